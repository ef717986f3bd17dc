//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use crate::config::DNS_TIMEOUT_SECS;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the system configuration (`/etc/resolv.conf` on Unix) when it can be
/// read, and the hickory default upstreams otherwise. Timeouts and retry
/// attempts are tightened in both cases so that an unresponsive name server
/// cannot stall a batch.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across tasks.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            debug!("System DNS configuration unavailable ({e}), using defaults");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2; // Fail faster on dead upstreams
    opts.ndots = 0; // Never append search domains to registrant names

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}
