//! Error type definitions.
//!
//! This module defines the errors used throughout the application: the
//! per-check taxonomy surfaced with an invalid outcome, the transport errors
//! it wraps, and the initialization and database errors of the outer layers.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{EnumIter as EnumIterMacro, IntoStaticStr};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A stored column could not be encoded or decoded.
    #[error("Column encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),
}

/// DNS lookup failure.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("DNS lookup for {domain} failed: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: hickory_resolver::error::ResolveError,
    },

    #[error("DNS lookup for {domain} timed out after {timeout_secs}s")]
    Timeout { domain: String, timeout_secs: u64 },

    #[error("No addresses found for {domain}")]
    NoAddresses { domain: String },
}

/// HTTP transport failure (connect, timeout, redirect loop, body read).
///
/// A completed response with a non-200 status is not a transport failure;
/// see [`CheckError::Status`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ReqwestError,
    },

    /// No connection could be established with the host.
    #[error("Request to {url} failed: {reason}")]
    Unreachable { url: String, reason: String },
}

/// Reason a single domain check came out invalid.
///
/// None of these are fatal to the process: a batch run records the
/// outcome and moves on to the next domain.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The domain name does not form a valid start URL.
    #[error("Invalid domain '{domain}': {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Resolution(#[from] ResolveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The final response after redirects was not 200 OK.
    #[error("Failed to load '{url}': HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("click-counter script not installed")]
    MarkerMissing,

    #[error("iframe has no src")]
    IframeMissingSrc,

    #[error("Invalid iframe target '{target}': {reason}")]
    TargetParse { target: String, reason: String },

    /// The nested check of the iframe target came out invalid.
    #[error("iframe target {target} failed: {source}")]
    IframeTarget {
        target: String,
        #[source]
        source: Box<CheckError>,
    },

    #[error("redirects to different domain: {host} (expected {expected})")]
    DomainMismatch { expected: String, host: String },
}

impl CheckError {
    pub fn kind(&self) -> CheckErrorKind {
        match self {
            CheckError::InvalidDomain { .. } => CheckErrorKind::InvalidDomain,
            CheckError::Resolution(_) => CheckErrorKind::ResolutionFailure,
            CheckError::Fetch(_) => CheckErrorKind::FetchFailure,
            CheckError::Status { .. } => CheckErrorKind::StatusFailure,
            CheckError::MarkerMissing => CheckErrorKind::MarkerMissing,
            CheckError::IframeMissingSrc => CheckErrorKind::IframeMissingSrc,
            CheckError::TargetParse { .. } => CheckErrorKind::TargetParseFailure,
            CheckError::IframeTarget { .. } => CheckErrorKind::IframeTargetFailure,
            CheckError::DomainMismatch { .. } => CheckErrorKind::DomainMismatch,
        }
    }

    /// Whether this failure came out of the fetch step and may trigger the
    /// single "www" fallback retry.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, CheckError::Fetch(_) | CheckError::Status { .. })
    }
}

/// Fieldless mirror of [`CheckError`] used for statistics and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CheckErrorKind {
    InvalidDomain,
    ResolutionFailure,
    FetchFailure,
    StatusFailure,
    MarkerMissing,
    IframeMissingSrc,
    TargetParseFailure,
    IframeTargetFailure,
    DomainMismatch,
}

impl std::fmt::Display for CheckErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CheckErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckErrorKind::InvalidDomain => "Invalid domain name",
            CheckErrorKind::ResolutionFailure => "DNS resolution failure",
            CheckErrorKind::FetchFailure => "HTTP fetch failure",
            CheckErrorKind::StatusFailure => "HTTP status not 200",
            CheckErrorKind::MarkerMissing => "Click-counter script missing",
            CheckErrorKind::IframeMissingSrc => "Iframe without src",
            CheckErrorKind::TargetParseFailure => "Iframe target not a valid URL",
            CheckErrorKind::IframeTargetFailure => "Iframe target check failed",
            CheckErrorKind::DomainMismatch => "Redirects to different domain",
        }
    }

    /// Stable snake_case identifier stored with check records.
    pub fn code(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_error_kinds_have_string_representation() {
        for kind in CheckErrorKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have a label", kind);
            assert_eq!(kind.to_string(), kind.as_str());
            assert!(
                kind.code().chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{:?} code should be snake_case",
                kind
            );
        }
        assert_eq!(CheckErrorKind::MarkerMissing.code(), "marker_missing");
        assert_eq!(CheckErrorKind::IframeMissingSrc.code(), "iframe_missing_src");
    }

    #[test]
    fn test_check_error_kind_mapping() {
        assert_eq!(
            CheckError::MarkerMissing.kind(),
            CheckErrorKind::MarkerMissing
        );
        assert_eq!(
            CheckError::IframeMissingSrc.kind(),
            CheckErrorKind::IframeMissingSrc
        );
        let mismatch = CheckError::DomainMismatch {
            expected: "example.hiv".to_string(),
            host: "other.hiv".to_string(),
        };
        assert_eq!(mismatch.kind(), CheckErrorKind::DomainMismatch);
        let resolution = CheckError::from(ResolveError::NoAddresses {
            domain: "example.hiv".to_string(),
        });
        assert_eq!(resolution.kind(), CheckErrorKind::ResolutionFailure);
    }

    #[test]
    fn test_fetch_failures_are_retryable_only_from_fetch_step() {
        let transport = CheckError::from(FetchError::Unreachable {
            url: "http://www.example.hiv/".to_string(),
            reason: "connection refused".to_string(),
        });
        let status = CheckError::Status {
            url: "http://www.example.hiv/".to_string(),
            status: 404,
        };
        assert!(transport.is_fetch_failure());
        assert!(status.is_fetch_failure());
        assert!(!CheckError::MarkerMissing.is_fetch_failure());
        assert!(!CheckError::from(ResolveError::NoAddresses {
            domain: "example.hiv".to_string()
        })
        .is_fetch_failure());
    }

    #[test]
    fn test_nested_error_message_names_target() {
        let err = CheckError::IframeTarget {
            target: "http://target.example/".to_string(),
            source: Box::new(CheckError::Status {
                url: "http://target.example/".to_string(),
                status: 500,
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("http://target.example/"));
        assert!(msg.contains("500"));
    }
}
