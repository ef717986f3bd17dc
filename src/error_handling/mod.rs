//! Error handling and processing statistics.
//!
//! This module provides:
//! - The per-check error taxonomy (`CheckError`) and its statistics key
//! - Transport errors for DNS and HTTP
//! - Initialization and database errors
//! - Thread-safe per-kind failure counters

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    CheckError, CheckErrorKind, DatabaseError, FetchError, InitializationError, ResolveError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for kind in CheckErrorKind::iter() {
            assert_eq!(stats.get_error_count(kind), 0);
        }
        assert_eq!(stats.valid_count(), 0);
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(CheckErrorKind::MarkerMissing);
        stats.increment_error(CheckErrorKind::MarkerMissing);
        stats.increment_error(CheckErrorKind::FetchFailure);
        stats.increment_valid();

        assert_eq!(stats.get_error_count(CheckErrorKind::MarkerMissing), 2);
        assert_eq!(stats.get_error_count(CheckErrorKind::FetchFailure), 1);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.valid_count(), 1);
    }
}
