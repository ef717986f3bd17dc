//! Per-domain task processing.

use std::sync::Arc;

use log::warn;
use tokio::sync::OwnedSemaphorePermit;

use crate::check::{VerificationOutcome, VerificationRequest, Verifier};
use crate::error_handling::ProcessingStats;
use crate::storage::ResultSink;

/// Everything a single spawned check needs.
pub struct DomainTaskParams {
    pub request: VerificationRequest,
    pub verifier: Verifier,
    pub sink: Arc<dyn ResultSink>,
    pub stats: Arc<ProcessingStats>,
    /// Held until the task completes
    pub permit: OwnedSemaphorePermit,
}

/// Checks one domain and hands the outcome to the sink.
///
/// A failing sink is logged and does not fail the check.
pub async fn process_domain_task(params: DomainTaskParams) -> VerificationOutcome {
    let DomainTaskParams {
        request,
        verifier,
        sink,
        stats,
        permit: _permit,
    } = params;

    let outcome = verifier.verify(&request).await;
    record_outcome(sink.as_ref(), &stats, &outcome).await;
    outcome
}

pub(crate) async fn record_outcome(
    sink: &dyn ResultSink,
    stats: &ProcessingStats,
    outcome: &VerificationOutcome,
) {
    match &outcome.error {
        None => stats.increment_valid(),
        Some(e) => stats.increment_error(e.kind()),
    }

    if let Err(e) = sink.on_check_result(outcome).await {
        warn!("[{}] Failed to store check result: {e}", outcome.domain);
    }
}
