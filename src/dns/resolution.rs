//! Host name to address resolution.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ResolveError;

/// Resolves a domain name to its network addresses.
///
/// Implementations must be safe to share across concurrently running checks.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Returns the sorted addresses of `domain`, or fails if none resolve.
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError>;
}

/// Resolves a hostname to all of its IP addresses using DNS.
///
/// # Arguments
///
/// * `host` - The hostname to resolve
/// * `resolver` - The DNS resolver instance
/// * `timeout` - Hard deadline for the whole lookup
///
/// # Returns
///
/// The sorted, de-duplicated addresses (A and AAAA).
///
/// # Errors
///
/// Returns an error if the lookup fails, exceeds `timeout`, or yields no addresses.
pub async fn resolve_host_addresses(
    host: &str,
    resolver: &TokioAsyncResolver,
    timeout: Duration,
) -> Result<Vec<IpAddr>, ResolveError> {
    let response = tokio::time::timeout(timeout, resolver.lookup_ip(host))
        .await
        .map_err(|_| ResolveError::Timeout {
            domain: host.to_string(),
            timeout_secs: timeout.as_secs(),
        })?
        .map_err(|source| ResolveError::Lookup {
            domain: host.to_string(),
            source,
        })?;
    let addresses = sorted(response.iter().collect());
    if addresses.is_empty() {
        return Err(ResolveError::NoAddresses {
            domain: host.to_string(),
        });
    }
    Ok(addresses)
}

fn sorted(mut addresses: Vec<IpAddr>) -> Vec<IpAddr> {
    addresses.sort_unstable();
    addresses.dedup();
    addresses
}

/// Production resolver backed by `hickory-resolver`.
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl HickoryResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }
}

#[async_trait]
impl Resolve for HickoryResolver {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        resolve_host_addresses(domain, &self.resolver, self.timeout).await
    }
}

/// Fixed host table. Unknown names fail with [`ResolveError::NoAddresses`].
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the addresses of `domain`.
    pub fn with_host(mut self, domain: &str, addresses: impl IntoIterator<Item = IpAddr>) -> Self {
        self.hosts
            .insert(domain.to_ascii_lowercase(), addresses.into_iter().collect());
        self
    }
}

#[async_trait]
impl Resolve for StaticResolver {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, ResolveError> {
        match self.hosts.get(&domain.to_ascii_lowercase()) {
            Some(addresses) if !addresses.is_empty() => Ok(sorted(addresses.clone())),
            _ => Err(ResolveError::NoAddresses {
                domain: domain.to_string(),
            }),
        }
    }
}
