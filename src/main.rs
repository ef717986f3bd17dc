//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `hiv_domain_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use hiv_domain_status::initialization::init_logger_with;
use hiv_domain_status::{
    check_all_domains, check_domain, domain_history, import_domains, Cli, Command, DomainCheck,
    HistoryFormat,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match cli.command {
        Command::Check {
            domain: Some(domain),
            all: false,
            ..
        } => check_domain(&config, &domain).await.map(|outcome| {
            match &outcome.error {
                None => println!("✅ {} is valid", outcome.domain),
                Some(e) => println!("❌ {} is invalid: {}", outcome.domain, e),
            }
            if let Some(path) = &outcome.body_file {
                println!("Body saved in {}", path.display());
            }
        }),
        Command::Check { .. } => check_all_domains(&config).await.map(|report| {
            println!(
                "✅ Checked {} domain{} ({} valid, {} invalid) in {:.1}s",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.valid,
                report.invalid,
                report.elapsed_seconds
            );
            println!("Results saved in {}", config.db_path.display());
        }),
        Command::Import { file } => import_domains(&config, &file).await.map(|report| {
            println!(
                "Imported {} domain{} ({} new)",
                report.read,
                if report.read == 1 { "" } else { "s" },
                report.added
            );
        }),
        Command::History { domain, format } => {
            domain_history(&config, &domain).await.and_then(|history| {
                for check in &history {
                    print_check(check, &format)?;
                }
                Ok(())
            })
        }
    };

    if let Err(e) = result {
        eprintln!("hiv_domain_status error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

fn print_check(check: &DomainCheck, format: &HistoryFormat) -> Result<()> {
    match format {
        HistoryFormat::Jsonl => println!("{}", serde_json::to_string(check)?),
        HistoryFormat::Plain => {
            let when = chrono::DateTime::from_timestamp_millis(check.created_at_ms)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            println!(
                "{}  {:<7}  {:>3}  {}  {}",
                when,
                if check.valid { "valid" } else { "invalid" },
                check
                    .status_code
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                check.url.as_deref().unwrap_or("-"),
                check.error.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}
