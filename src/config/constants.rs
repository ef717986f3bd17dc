//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits and the click-counter marker literals.

use std::time::Duration;

/// Well-known click-counter script URL that registrants must embed.
///
/// Matched exactly against the `src` attribute of every `<script>` tag.
pub const CLICKCOUNTER_SCRIPT: &str = "//dothiv-registry.appspot.com/static/clickcounter.min.js";

/// Identifier carried by the click-counter redirect iframe.
pub const CLICKCOUNTER_IFRAME_ID: &str = "clickcounter-target-iframe";

/// Domains whose last label equals this suffix get the full marker verification.
pub const DEFAULT_SCOPE_SUFFIX: &str = "hiv";

pub const DB_PATH: &str = "./hiv_domain_status.db";

// Network operation timeouts
/// Per-request HTTP deadline in seconds (connect, redirects and body read).
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum concurrent domain checks during a batch run.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Progress logging interval during batch runs.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; hiv-domain-status/0.1; +https://click4life.hiv/)";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Larger bodies are truncated before marker scanning
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Redirect handling
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Maximum error message length stored with a check record.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
