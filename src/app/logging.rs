//! Progress logging utilities.

use log::info;

/// Logs progress information about a batch run.
///
/// # Arguments
///
/// * `start_time` - The start time of the batch
/// * `completed` - Number of finished checks
/// * `total` - Number of checks in the batch
pub fn log_progress(start_time: std::time::Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Checked {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed, total, elapsed_secs, rate
    );
}
