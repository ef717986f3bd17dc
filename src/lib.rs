//! hiv_domain_status library: click-counter verification of registry domains
//!
//! This library checks that a domain resolves, loads over HTTP (following
//! redirects, with a single fallback from `www.<domain>` to `<domain>`),
//! embeds the click-counter script and, when present, that the click-counter
//! iframe points to a reachable target on the same site. Outcomes are stored
//! in a SQLite database, keeping a row only when a domain's result changes.
//!
//! # Example
//!
//! ```no_run
//! use hiv_domain_status::{check_domain, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     db_path: std::path::PathBuf::from("./checks.db"),
//!     ..Default::default()
//! };
//!
//! let outcome = check_domain(&config, "example.hiv").await?;
//! match &outcome.error {
//!     None => println!("{} is valid", outcome.domain),
//!     Some(e) => println!("{} is invalid: {}", outcome.domain, e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod check;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod markup;
mod run;
pub mod storage;

// Re-export public API
pub use check::{
    DomainScope, SuffixScope, VerificationOutcome, VerificationRequest, Verifier,
};
pub use config::{Cli, Command, Config, HistoryFormat, LogFormat, LogLevel};
pub use error_handling::{CheckError, CheckErrorKind};
pub use run::{
    check_all_domains, check_domain, check_domains, domain_history, import_domains,
    init_verifier, open_database, CheckReport, ImportReport,
};
pub use storage::{DomainCheck, DomainRecord, Persisted, ResultSink, SqliteSink};
