//! Check history queries.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::DomainCheck;

const CHECK_COLUMNS: &str = "id, domain, dns_ok, addresses, url, status_code, script_present,
     iframe_present, iframe_target, iframe_target_ok, valid, error_kind, error, created_at_ms";

/// Inserts a check record and returns its id.
pub async fn persist(pool: &SqlitePool, check: &DomainCheck) -> Result<i64, DatabaseError> {
    let addresses = serde_json::to_string(&check.addresses)?;
    let result = sqlx::query(
        "INSERT INTO domain_check (
            domain, dns_ok, addresses, url, status_code, script_present, iframe_present,
            iframe_target, iframe_target_ok, valid, error_kind, error, created_at_ms
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&check.domain)
    .bind(check.dns_ok)
    .bind(addresses)
    .bind(check.url.as_deref())
    .bind(check.status_code.map(i64::from))
    .bind(check.script_present)
    .bind(check.iframe_present)
    .bind(check.iframe_target.as_deref())
    .bind(check.iframe_target_ok)
    .bind(check.valid)
    .bind(check.error_kind.as_deref())
    .bind(check.error.as_deref())
    .bind(check.created_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(result.last_insert_rowid())
}

/// Every stored check, oldest first.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<DomainCheck>, DatabaseError> {
    let rows = sqlx::query(&format!(
        "SELECT {CHECK_COLUMNS} FROM domain_check ORDER BY id"
    ))
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    rows.iter().map(DomainCheck::from_row).collect()
}

/// Stored checks of one domain, oldest first.
pub async fn find_by_domain(
    pool: &SqlitePool,
    domain: &str,
) -> Result<Vec<DomainCheck>, DatabaseError> {
    let rows = sqlx::query(&format!(
        "SELECT {CHECK_COLUMNS} FROM domain_check WHERE domain = ? ORDER BY id"
    ))
    .bind(domain)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    rows.iter().map(DomainCheck::from_row).collect()
}

pub async fn find_latest_by_domain(
    pool: &SqlitePool,
    domain: &str,
) -> Result<Option<DomainCheck>, DatabaseError> {
    let row = sqlx::query(&format!(
        "SELECT {CHECK_COLUMNS} FROM domain_check WHERE domain = ? ORDER BY id DESC LIMIT 1"
    ))
    .bind(domain)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    row.as_ref().map(DomainCheck::from_row).transpose()
}
