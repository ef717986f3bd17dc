// storage/models.rs
// Database models and types

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::check::VerificationOutcome;
use crate::config::MAX_ERROR_MESSAGE_LENGTH;
use crate::error_handling::DatabaseError;

/// A registered domain.
///
/// Maps to the `domain` table. `valid` mirrors the most recent check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    pub id: i64,
    pub name: String,
    pub valid: bool,
    pub created_at_ms: i64,
}

impl DomainRecord {
    pub(crate) fn from_row(row: &SqliteRow) -> Self {
        Self {
            id: row.get("id"),
            name: row.get("name"),
            valid: row.get("valid"),
            created_at_ms: row.get("created_at_ms"),
        }
    }
}

/// A stored check result.
///
/// Maps to the `domain_check` table. `addresses` is kept sorted and stored
/// as a JSON array. The error is diagnostic only: two checks with the same
/// observable result but different error wording are the same result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub domain: String,
    pub dns_ok: bool,
    pub addresses: Vec<String>,
    pub url: Option<String>,
    pub status_code: Option<u16>,
    pub script_present: bool,
    pub iframe_present: bool,
    pub iframe_target: Option<String>,
    pub iframe_target_ok: bool,
    pub valid: bool,
    pub error_kind: Option<String>,
    pub error: Option<String>,
    pub created_at_ms: i64,
}

impl DomainCheck {
    /// Builds an unsaved record from a verification outcome.
    pub fn from_outcome(outcome: &VerificationOutcome) -> Self {
        Self {
            id: None,
            domain: outcome.domain.clone(),
            dns_ok: outcome.dns_ok,
            addresses: outcome.address_strings(),
            url: outcome.url.as_ref().map(ToString::to_string),
            status_code: outcome.status_code,
            script_present: outcome.script_present,
            iframe_present: outcome.iframe_present,
            iframe_target: outcome.iframe_target.clone(),
            iframe_target_ok: outcome.iframe_target_ok,
            valid: outcome.valid,
            error_kind: outcome.error.as_ref().map(|e| e.kind().code().to_string()),
            error: outcome
                .error
                .as_ref()
                .map(|e| truncate_message(&e.to_string())),
            created_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Whether two checks observed the same result.
    ///
    /// Compares every observable field; ids, timestamps and error texts are
    /// ignored.
    pub fn same_result(&self, other: &DomainCheck) -> bool {
        self.domain == other.domain
            && self.dns_ok == other.dns_ok
            && self.addresses == other.addresses
            && self.url == other.url
            && self.status_code == other.status_code
            && self.script_present == other.script_present
            && self.iframe_present == other.iframe_present
            && self.iframe_target == other.iframe_target
            && self.iframe_target_ok == other.iframe_target_ok
            && self.valid == other.valid
    }

    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, DatabaseError> {
        let addresses: String = row.get("addresses");
        let status_code: Option<i64> = row.get("status_code");
        Ok(Self {
            id: Some(row.get("id")),
            domain: row.get("domain"),
            dns_ok: row.get("dns_ok"),
            addresses: serde_json::from_str(&addresses)?,
            url: row.get("url"),
            status_code: status_code.and_then(|s| u16::try_from(s).ok()),
            script_present: row.get("script_present"),
            iframe_present: row.get("iframe_present"),
            iframe_target: row.get("iframe_target"),
            iframe_target_ok: row.get("iframe_target_ok"),
            valid: row.get("valid"),
            error_kind: row.get("error_kind"),
            error: row.get("error"),
            created_at_ms: row.get("created_at_ms"),
        })
    }
}

fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(MAX_ERROR_MESSAGE_LENGTH).collect();
    truncated.push_str("...");
    truncated
}
