//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data creation
//! used across storage module tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::models::DomainCheck;
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
///
/// A single connection keeps every query on the same in-memory database.
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

/// A valid, in-scope check result for `domain`.
pub fn sample_check(domain: &str) -> DomainCheck {
    DomainCheck {
        id: None,
        domain: domain.to_string(),
        dns_ok: true,
        addresses: vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()],
        url: Some(format!("http://www.{domain}/")),
        status_code: Some(200),
        script_present: true,
        iframe_present: false,
        iframe_target: None,
        iframe_target_ok: false,
        valid: true,
        error_kind: None,
        error: None,
        created_at_ms: 1_704_067_200_000,
    }
}
