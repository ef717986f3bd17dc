//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_SCOPE_SUFFIX, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Output format of the `history` command.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    /// One aligned line per check
    Plain,
    /// One JSON object per line
    Jsonl,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through the command line.
///
/// # Examples
///
/// ```no_run
/// use hiv_domain_status::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("./checks.db"),
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Maximum concurrent domain checks in a batch run
    pub max_concurrency: usize,

    /// Per-request timeout in seconds (DNS and HTTP)
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Last domain label that puts a domain in scope for marker verification
    pub scope_suffix: String,

    /// Keep fetched top-level bodies in temp files for debugging
    pub save_bodies: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            scope_suffix: DEFAULT_SCOPE_SUFFIX.to_string(),
            save_bodies: false,
        }
    }
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Register domains from a file, then check all of them
/// hiv_domain_status import domains.txt
/// hiv_domain_status check --all
///
/// # Ad hoc check of a single domain, keeping the fetched body
/// hiv_domain_status check example.hiv --save-bodies
///
/// # Show the stored check history of a domain
/// hiv_domain_status history example.hiv --format jsonl
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "hiv_domain_status",
    about = "Verifies that domains embed the click-counter snippet and that their redirect targets work."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, global = true, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a single domain, or every registered domain with --all
    Check {
        /// Domain to check (e.g. example.hiv)
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        domain: Option<String>,

        /// Check all registered domains
        #[arg(long)]
        all: bool,

        /// Maximum concurrent checks
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
        max_concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_seconds: u64,

        /// HTTP User-Agent header value
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,

        /// Last domain label that requires the click-counter markers
        #[arg(long, default_value = DEFAULT_SCOPE_SUFFIX)]
        scope_suffix: String,

        /// Keep fetched bodies in temp files for debugging
        #[arg(long)]
        save_bodies: bool,
    },

    /// Register domains from a file (one per line, `#` starts a comment)
    Import {
        /// File to read; `-` reads stdin
        #[arg(value_parser)]
        file: PathBuf,
    },

    /// Print the stored check history of a domain
    History {
        /// Domain name
        domain: String,

        /// Output format: plain|jsonl
        #[arg(long, value_enum, default_value_t = HistoryFormat::Plain)]
        format: HistoryFormat,
    },
}

impl Cli {
    /// Builds the library configuration from the parsed command line.
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            log_level: self.global.log_level.clone(),
            log_format: self.global.log_format.clone(),
            db_path: self.global.db_path.clone(),
            ..Default::default()
        };
        if let Command::Check {
            max_concurrency,
            timeout_seconds,
            user_agent,
            scope_suffix,
            save_bodies,
            ..
        } = &self.command
        {
            config.max_concurrency = (*max_concurrency).max(1);
            config.timeout_seconds = *timeout_seconds;
            config.user_agent = user_agent.clone();
            config.scope_suffix = scope_suffix.clone();
            config.save_bodies = *save_bodies;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.scope_suffix, "hiv");
        assert!(!config.save_bodies);
        assert_eq!(config.db_path, PathBuf::from(DB_PATH));
    }

    #[test]
    fn test_cli_check_single_domain() {
        let cli = Cli::try_parse_from(["hiv_domain_status", "check", "example.hiv"])
            .expect("Should parse check command");
        match &cli.command {
            Command::Check { domain, all, .. } => {
                assert_eq!(domain.as_deref(), Some("example.hiv"));
                assert!(!all);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_check_all_with_options() {
        let cli = Cli::try_parse_from([
            "hiv_domain_status",
            "--db-path",
            "/tmp/x.db",
            "check",
            "--all",
            "--max-concurrency",
            "3",
            "--timeout-seconds",
            "2",
            "--save-bodies",
        ])
        .expect("Should parse check --all");
        let config = cli.to_config();
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.timeout_seconds, 2);
        assert!(config.save_bodies);
    }

    #[test]
    fn test_cli_check_requires_domain_or_all() {
        assert!(Cli::try_parse_from(["hiv_domain_status", "check"]).is_err());
        assert!(
            Cli::try_parse_from(["hiv_domain_status", "check", "example.hiv", "--all"]).is_err()
        );
    }

    #[test]
    fn test_cli_zero_concurrency_is_clamped() {
        let cli = Cli::try_parse_from([
            "hiv_domain_status",
            "check",
            "--all",
            "--max-concurrency",
            "0",
        ])
        .expect("Should parse");
        assert_eq!(cli.to_config().max_concurrency, 1);
    }

    #[test]
    fn test_cli_history_format() {
        let cli = Cli::try_parse_from([
            "hiv_domain_status",
            "history",
            "example.hiv",
            "--format",
            "jsonl",
        ])
        .expect("Should parse history");
        match cli.command {
            Command::History { domain, format } => {
                assert_eq!(domain, "example.hiv");
                assert_eq!(format, HistoryFormat::Jsonl);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }
}
