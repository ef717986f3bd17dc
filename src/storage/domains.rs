//! Domain registry queries.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::DomainRecord;

/// Registers a domain. Returns `false` if it was already registered.
pub async fn persist(pool: &SqlitePool, name: &str) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO domain (name, valid, created_at_ms) VALUES (?, 0, ?)
         ON CONFLICT(name) DO NOTHING",
    )
    .bind(name)
    .bind(chrono::Utc::now().timestamp_millis())
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(result.rows_affected() > 0)
}

/// Sets the validity of a domain, registering it first if needed.
pub async fn set_valid(pool: &SqlitePool, name: &str, valid: bool) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO domain (name, valid, created_at_ms) VALUES (?, ?, ?)
         ON CONFLICT(name) DO UPDATE SET valid = excluded.valid",
    )
    .bind(name)
    .bind(valid)
    .bind(chrono::Utc::now().timestamp_millis())
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}

/// All registered domains, ordered by name.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<DomainRecord>, DatabaseError> {
    let rows = sqlx::query("SELECT id, name, valid, created_at_ms FROM domain ORDER BY name")
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    Ok(rows.iter().map(DomainRecord::from_row).collect())
}

pub async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<DomainRecord>, DatabaseError> {
    let row = sqlx::query("SELECT id, name, valid, created_at_ms FROM domain WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    Ok(row.as_ref().map(DomainRecord::from_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_persist_is_idempotent() {
        let pool = create_test_pool().await;

        assert!(persist(&pool, "example.hiv").await.expect("insert"));
        assert!(!persist(&pool, "example.hiv").await.expect("insert"));

        let all = find_all(&pool).await.expect("query");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "example.hiv");
        assert!(!all[0].valid);
    }

    #[tokio::test]
    async fn test_find_all_is_sorted() {
        let pool = create_test_pool().await;
        for name in ["zeta.hiv", "alpha.hiv", "mid.hiv"] {
            persist(&pool, name).await.expect("insert");
        }

        let names: Vec<String> = find_all(&pool)
            .await
            .expect("query")
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["alpha.hiv", "mid.hiv", "zeta.hiv"]);
    }

    #[tokio::test]
    async fn test_set_valid_creates_and_updates() {
        let pool = create_test_pool().await;

        set_valid(&pool, "new.hiv", true).await.expect("upsert");
        let domain = find_by_name(&pool, "new.hiv")
            .await
            .expect("query")
            .expect("registered");
        assert!(domain.valid);

        set_valid(&pool, "new.hiv", false).await.expect("upsert");
        let domain = find_by_name(&pool, "new.hiv")
            .await
            .expect("query")
            .expect("registered");
        assert!(!domain.valid);
    }

    #[tokio::test]
    async fn test_find_by_name_missing() {
        let pool = create_test_pool().await;
        assert!(find_by_name(&pool, "nothing.hiv")
            .await
            .expect("query")
            .is_none());
    }
}
