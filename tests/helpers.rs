// Shared test helpers for verifier and database setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use httptest::Server;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use url::Url;

use hiv_domain_status::dns::StaticResolver;
use hiv_domain_status::fetch::HttpFetcher;
use hiv_domain_status::initialization::init_client;
use hiv_domain_status::storage::run_migrations;
use hiv_domain_status::{Config, Verifier};

pub const SCRIPT_TAG: &str =
    r#"<script type="text/javascript" src="//dothiv-registry.appspot.com/static/clickcounter.min.js"></script>"#;

/// Creates a test database pool with migrations applied.
/// Uses a single-connection in-memory database for fast test execution.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// URL of `path` on the mock server.
#[allow(dead_code)]
pub fn server_url(server: &Server, path: &str) -> Url {
    Url::parse(&format!("http://{}{}", server.addr(), path)).expect("valid server URL")
}

/// Verifier using the real HTTP stack, a host table that knows `127.0.0.1`,
/// and a scope that puts every domain under full verification.
#[allow(dead_code)]
pub fn loopback_verifier() -> Verifier {
    let config = Config {
        timeout_seconds: 5,
        ..Default::default()
    };
    let client = init_client(&config).expect("Failed to build client");
    let loopback: IpAddr = "127.0.0.1".parse().expect("valid IP");

    Verifier::new(
        Arc::new(StaticResolver::new().with_host("127.0.0.1", [loopback])),
        Arc::new(HttpFetcher::new(client, Duration::from_secs(5))),
        Arc::new(|_: &str| true),
    )
}

/// Page embedding the click-counter script and, optionally, the iframe.
#[allow(dead_code)]
pub fn clickcounter_page(iframe_src: Option<&str>) -> String {
    let iframe = iframe_src
        .map(|src| {
            format!(r#"<iframe id="clickcounter-target-iframe" src="{src}" frameborder="0"></iframe>"#)
        })
        .unwrap_or_default();
    format!("<html><head>{SCRIPT_TAG}</head><body>{iframe}</body></html>")
}
