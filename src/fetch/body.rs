//! Body size capping and debug retention.

use std::io::Write;
use std::path::PathBuf;

use log::{error, info};

use crate::config::MAX_RESPONSE_BODY_SIZE;

/// Caps a body at `MAX_RESPONSE_BODY_SIZE` bytes.
pub fn truncate_body(mut body: Vec<u8>) -> Vec<u8> {
    body.truncate(MAX_RESPONSE_BODY_SIZE);
    body
}

/// Writes a fetched body to a kept temp file named `<domain>-check*`.
///
/// Returns the file path, or `None` if the file could not be written.
/// Failures are logged and never abort a check.
pub fn persist_body(domain: &str, body: &[u8]) -> Option<PathBuf> {
    let prefix = format!("{}-check", sanitize_prefix(domain));
    let mut file = match tempfile::Builder::new().prefix(&prefix).tempfile() {
        Ok(file) => file,
        Err(e) => {
            error!("[{domain}] Failed to create temp file for body: {e}");
            return None;
        }
    };
    if let Err(e) = file.write_all(body) {
        error!("[{domain}] Failed to save body to temp file: {e}");
        return None;
    }
    match file.keep() {
        Ok((_, path)) => {
            info!("[{domain}] Saved body to {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("[{domain}] Failed to keep body temp file: {e}");
            None
        }
    }
}

// Domain names are user input; keep the temp file inside the temp dir.
fn sanitize_prefix(domain: &str) -> String {
    domain
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
