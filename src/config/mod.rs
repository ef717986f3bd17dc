//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, marker literals, limits)
//! - The library `Config` struct
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, Config, GlobalOpts, HistoryFormat, LogFormat, LogLevel};
