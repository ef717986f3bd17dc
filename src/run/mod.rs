//! Verification triggers: single-domain and batch checks, domain import and
//! history lookup.

mod init;
mod task;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::app::{log_progress, print_error_statistics};
use crate::check::{VerificationOutcome, VerificationRequest, Verifier};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::error_handling::ProcessingStats;
use crate::initialization::init_semaphore;
use crate::storage::{checks, domains, DomainCheck, ResultSink, SqliteSink};

pub use init::{init_verifier, open_database};
use task::{process_domain_task, record_outcome, DomainTaskParams};

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Number of domains checked
    pub total: usize,
    /// Number of valid outcomes
    pub valid: usize,
    /// Number of invalid outcomes
    pub invalid: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Summary of a domain import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Domain names read from the input
    pub read: usize,
    /// Names that were not registered before
    pub added: usize,
}

/// Checks a single domain and records the outcome in the configured database.
///
/// # Example
///
/// ```no_run
/// use hiv_domain_status::{check_domain, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let outcome = check_domain(&Config::default(), "example.hiv").await?;
/// println!("{} valid: {}", outcome.domain, outcome.valid);
/// # Ok(())
/// # }
/// ```
pub async fn check_domain(config: &Config, domain: &str) -> Result<VerificationOutcome> {
    let request = VerificationRequest::new(domain).with_save_body(config.save_bodies);
    check_request(config, &request).await
}

async fn check_request(
    config: &Config,
    request: &VerificationRequest,
) -> Result<VerificationOutcome> {
    let pool = open_database(config).await?;
    let verifier = init_verifier(config)?;
    let sink = SqliteSink::new(pool.clone());
    let stats = ProcessingStats::new();

    let outcome = verifier.verify(request).await;
    record_outcome(&sink, &stats, &outcome).await;

    pool.close().await;
    Ok(outcome)
}

/// Checks every registered domain.
pub async fn check_all_domains(config: &Config) -> Result<CheckReport> {
    let pool = open_database(config).await?;
    let names: Vec<String> = domains::find_all(&pool)
        .await
        .context("Failed to load registered domains")?
        .into_iter()
        .map(|d| d.name)
        .collect();
    info!("Checking {} registered domains", names.len());

    let verifier = init_verifier(config)?;
    let sink: Arc<dyn ResultSink> = Arc::new(SqliteSink::new(pool.clone()));
    let report = check_domains(
        &verifier,
        sink,
        names,
        config.max_concurrency,
        config.save_bodies,
    )
    .await;

    // Checkpoint WAL file for clean database state
    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool.as_ref())
        .await
    {
        warn!("Failed to checkpoint WAL file (this is non-critical): {e}");
    }
    pool.close().await;
    Ok(report)
}

/// Checks `domains` with at most `max_concurrency` checks in flight.
///
/// Every outcome goes to `sink`. A failing domain never stops the batch.
pub async fn check_domains(
    verifier: &Verifier,
    sink: Arc<dyn ResultSink>,
    domains: Vec<String>,
    max_concurrency: usize,
    save_bodies: bool,
) -> CheckReport {
    let start_time = Instant::now();
    let total = domains.len();
    let semaphore = init_semaphore(max_concurrency);
    let stats = Arc::new(ProcessingStats::new());
    let mut tasks = FuturesUnordered::new();

    for domain in domains {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Semaphore closed, stopping batch: {e}");
                break;
            }
        };
        let params = DomainTaskParams {
            request: VerificationRequest::new(&domain).with_save_body(save_bodies),
            verifier: verifier.clone(),
            sink: Arc::clone(&sink),
            stats: Arc::clone(&stats),
            permit,
        };
        tasks.push(tokio::spawn(process_domain_task(params)));
    }

    let mut completed = 0usize;
    let mut ticker = tokio::time::interval(LOGGING_INTERVAL);
    ticker.tick().await;
    loop {
        tokio::select! {
            next = tasks.next() => match next {
                Some(Ok(_)) => completed += 1,
                Some(Err(e)) => {
                    completed += 1;
                    warn!("Check task failed: {e}");
                }
                None => break,
            },
            _ = ticker.tick() => log_progress(start_time, completed, total),
        }
    }
    log_progress(start_time, completed, total);
    print_error_statistics(&stats);

    let valid = stats.valid_count();
    CheckReport {
        total,
        valid,
        invalid: total - valid,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    }
}

/// Registers the domains listed in `source` (`-` reads stdin).
///
/// One name per line; blank lines and `#` comments are skipped and names are
/// lowercased.
pub async fn import_domains(config: &Config, source: &Path) -> Result<ImportReport> {
    let names = if source.as_os_str() == "-" {
        info!("Reading domains from stdin");
        read_domain_names(BufReader::new(tokio::io::stdin())).await?
    } else {
        let file = tokio::fs::File::open(source)
            .await
            .with_context(|| format!("Failed to open input file {}", source.display()))?;
        read_domain_names(BufReader::new(file)).await?
    };

    let pool = open_database(config).await?;
    let mut added = 0usize;
    for name in &names {
        if domains::persist(&pool, name)
            .await
            .with_context(|| format!("Failed to register {name}"))?
        {
            added += 1;
        }
    }
    info!("Imported {} domains ({} new)", names.len(), added);
    pool.close().await;

    Ok(ImportReport {
        read: names.len(),
        added,
    })
}

/// Stored check history of `domain`, oldest first.
pub async fn domain_history(config: &Config, domain: &str) -> Result<Vec<DomainCheck>> {
    let pool = open_database(config).await?;
    let name = VerificationRequest::new(domain).domain;
    let history = checks::find_by_domain(&pool, &name)
        .await
        .with_context(|| format!("Failed to load history of {name}"))?;
    pool.close().await;
    Ok(history)
}

async fn read_domain_names<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read domain list")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let name = VerificationRequest::new(trimmed).domain;
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    Ok(names)
}
