//! Check resource initialization.
//!
//! Builds the database pool and the verifier (HTTP client, DNS resolver,
//! scope predicate) from a [`Config`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::check::{SuffixScope, Verifier};
use crate::config::Config;
use crate::dns::HickoryResolver;
use crate::fetch::HttpFetcher;
use crate::initialization::{init_client, init_resolver};
use crate::storage::{init_db_pool_with_path, run_migrations};

/// Opens the configured database and applies pending migrations.
pub async fn open_database(config: &Config) -> Result<Arc<SqlitePool>> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

/// Builds a verifier backed by the network.
pub fn init_verifier(config: &Config) -> Result<Verifier> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let resolver = init_resolver();

    Ok(Verifier::new(
        Arc::new(HickoryResolver::new(resolver, timeout)),
        Arc::new(HttpFetcher::new(client, timeout)),
        Arc::new(SuffixScope::new(&config.scope_suffix)),
    ))
}
