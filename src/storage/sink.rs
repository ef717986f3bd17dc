//! Result sink: persists verification outcomes.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use sqlx::SqlitePool;

use crate::check::VerificationOutcome;
use crate::error_handling::DatabaseError;
use crate::storage::models::DomainCheck;
use crate::storage::{checks, domains};

/// What a sink did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    /// A new check record with this id was stored
    Inserted(i64),
    /// The result equals the latest stored one; nothing new was stored
    Unchanged,
}

/// Receives every verification outcome.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn on_check_result(
        &self,
        outcome: &VerificationOutcome,
    ) -> Result<Persisted, DatabaseError>;
}

/// SQLite-backed sink with change-only history.
///
/// The domain row is created if missing and its validity always follows the
/// outcome. A check record is inserted only when the result differs from the
/// latest stored record of that domain.
#[derive(Clone)]
pub struct SqliteSink {
    pool: Arc<SqlitePool>,
}

impl SqliteSink {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultSink for SqliteSink {
    async fn on_check_result(
        &self,
        outcome: &VerificationOutcome,
    ) -> Result<Persisted, DatabaseError> {
        let check = DomainCheck::from_outcome(outcome);
        domains::set_valid(&self.pool, &check.domain, check.valid).await?;

        let previous = checks::find_latest_by_domain(&self.pool, &check.domain).await?;
        if previous.is_some_and(|p| p.same_result(&check)) {
            debug!("[{}] Result unchanged, not stored", check.domain);
            return Ok(Persisted::Unchanged);
        }

        let id = checks::persist(&self.pool, &check).await?;
        debug!("[{}] Stored check {id}", check.domain);
        Ok(Persisted::Inserted(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::CheckError;
    use crate::storage::test_helpers::create_test_pool;
    use url::Url;

    fn outcome(domain: &str, status: u16) -> VerificationOutcome {
        let mut outcome = VerificationOutcome::new(
            domain,
            Some(Url::parse(&format!("http://www.{domain}/")).expect("valid")),
        );
        outcome.dns_ok = true;
        outcome.addresses = vec!["192.0.2.1".parse().expect("ip")];
        outcome.status_code = Some(status);
        outcome.script_present = status == 200;
        if status != 200 {
            outcome.fail(CheckError::Status {
                url: format!("http://www.{domain}/"),
                status,
            });
        }
        outcome
    }

    #[tokio::test]
    async fn test_first_result_is_inserted() {
        let pool = Arc::new(create_test_pool().await);
        let sink = SqliteSink::new(pool.clone());

        let persisted = sink
            .on_check_result(&outcome("example.hiv", 200))
            .await
            .expect("persist");
        assert!(matches!(persisted, Persisted::Inserted(_)));

        let domain = domains::find_by_name(&pool, "example.hiv")
            .await
            .expect("query")
            .expect("registered");
        assert!(domain.valid);
    }

    #[tokio::test]
    async fn test_unchanged_result_is_not_stored() {
        let pool = Arc::new(create_test_pool().await);
        let sink = SqliteSink::new(pool.clone());

        sink.on_check_result(&outcome("example.hiv", 200))
            .await
            .expect("persist");
        let second = sink
            .on_check_result(&outcome("example.hiv", 200))
            .await
            .expect("persist");

        assert_eq!(second, Persisted::Unchanged);
        let history = checks::find_by_domain(&pool, "example.hiv")
            .await
            .expect("query");
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_changed_result_is_stored_and_validity_follows() {
        let pool = Arc::new(create_test_pool().await);
        let sink = SqliteSink::new(pool.clone());

        sink.on_check_result(&outcome("example.hiv", 200))
            .await
            .expect("persist");
        let persisted = sink
            .on_check_result(&outcome("example.hiv", 503))
            .await
            .expect("persist");
        assert!(matches!(persisted, Persisted::Inserted(_)));

        let history = checks::find_by_domain(&pool, "example.hiv")
            .await
            .expect("query");
        assert_eq!(history.len(), 2);
        assert!(history[0].valid);
        assert!(!history[1].valid);
        assert_eq!(history[1].error_kind.as_deref(), Some("status_failure"));

        let domain = domains::find_by_name(&pool, "example.hiv")
            .await
            .expect("query")
            .expect("registered");
        assert!(!domain.valid);

        // Back to the first result: a change again
        let persisted = sink
            .on_check_result(&outcome("example.hiv", 200))
            .await
            .expect("persist");
        assert!(matches!(persisted, Persisted::Inserted(_)));
    }

    #[tokio::test]
    async fn test_results_are_kept_per_domain() {
        let pool = Arc::new(create_test_pool().await);
        let sink = SqliteSink::new(pool.clone());

        sink.on_check_result(&outcome("a.hiv", 200))
            .await
            .expect("persist");
        let other = sink
            .on_check_result(&outcome("b.hiv", 200))
            .await
            .expect("persist");

        assert!(matches!(other, Persisted::Inserted(_)));
        assert_eq!(domains::find_all(&pool).await.expect("query").len(), 2);
    }
}
