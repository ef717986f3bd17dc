//! DNS module tests.

use super::*;
use crate::error_handling::ResolveError;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid IP literal in test")
}

/// Creates a test DNS resolver with short timeouts for faster test execution.
fn create_test_resolver() -> hickory_resolver::TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(5);
    opts.attempts = 1; // Single attempt for faster failures in tests
    opts.ndots = 0;

    hickory_resolver::TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}

#[tokio::test]
async fn test_static_resolver_sorts_addresses() {
    let resolver = StaticResolver::new().with_host(
        "example.hiv",
        [ip("10.0.0.2"), ip("::1"), ip("10.0.0.1"), ip("10.0.0.2")],
    );
    let addresses = resolver
        .lookup_host("example.hiv")
        .await
        .expect("known host should resolve");
    assert_eq!(addresses, vec![ip("10.0.0.1"), ip("10.0.0.2"), ip("::1")]);
}

#[tokio::test]
async fn test_static_resolver_is_deterministic() {
    let resolver = StaticResolver::new().with_host(
        "example.hiv",
        [ip("192.0.2.9"), ip("192.0.2.1"), ip("192.0.2.5")],
    );
    let first = resolver.lookup_host("example.hiv").await.expect("resolves");
    let second = resolver.lookup_host("EXAMPLE.hiv").await.expect("resolves");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_static_resolver_unknown_host() {
    let resolver = StaticResolver::new();
    let err = resolver
        .lookup_host("missing.hiv")
        .await
        .expect_err("unknown host should fail");
    assert!(matches!(err, ResolveError::NoAddresses { ref domain } if domain == "missing.hiv"));
}

#[tokio::test]
async fn test_hickory_resolver_through_trait_object() {
    let resolver: Arc<dyn Resolve> = Arc::new(HickoryResolver::new(
        Arc::new(create_test_resolver()),
        Duration::from_secs(5),
    ));
    // .invalid is reserved and never resolves
    let result = resolver
        .lookup_host("definitely-does-not-exist-12345.invalid")
        .await;
    assert!(result.is_err(), "reserved TLD must not resolve");
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_resolve_host_addresses_success() {
    let resolver = create_test_resolver();
    let addresses = resolve_host_addresses("google.com", &resolver, Duration::from_secs(5))
        .await
        .expect("google.com should resolve");
    assert!(!addresses.is_empty());
    let mut sorted = addresses.clone();
    sorted.sort_unstable();
    assert_eq!(addresses, sorted, "addresses must come back sorted");
}
