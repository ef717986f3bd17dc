//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{CheckErrorKind, ProcessingStats};

/// Prints valid and per-kind failure counts to the log.
pub fn print_error_statistics(stats: &ProcessingStats) {
    info!("Valid domains: {}", stats.valid_count());

    let total_errors = stats.total_errors();
    if total_errors > 0 {
        info!("Problem Counts ({} total):", total_errors);
        for kind in CheckErrorKind::iter() {
            let count = stats.get_error_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
