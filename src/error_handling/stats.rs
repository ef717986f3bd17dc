//! Processing statistics tracking.
//!
//! This module provides thread-safe counters of check failures per
//! [`CheckErrorKind`] during a batch run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::CheckErrorKind;

/// Thread-safe processing statistics tracker.
///
/// All kinds are initialized to zero on creation, so the counters can be
/// shared across tasks with `Arc` without further locking.
pub struct ProcessingStats {
    errors: HashMap<CheckErrorKind, AtomicUsize>,
    valid: AtomicUsize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in CheckErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            valid: AtomicUsize::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, kind: CheckErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map.",
                kind
            );
        }
    }

    pub fn increment_valid(&self) {
        self.valid.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an error kind.
    pub fn get_error_count(&self, kind: CheckErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn valid_count(&self) -> usize {
        self.valid.load(Ordering::SeqCst)
    }

    /// Get total error count across all kinds.
    pub fn total_errors(&self) -> usize {
        CheckErrorKind::iter()
            .map(|k| self.get_error_count(k))
            .sum()
    }
}
