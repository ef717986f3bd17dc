//! HTTP page fetching.
//!
//! This module provides the [`Fetch`] seam used by the verifier and its
//! `reqwest`-backed implementation. A fetch follows redirects the way the
//! transport does and reports the final URL, the status code and the body.
//! Non-200 statuses are returned as data; the verifier decides what they mean.

mod body;
mod request;

use async_trait::async_trait;
use url::Url;

use crate::error_handling::FetchError;

// Re-export public API
pub use body::{persist_body, truncate_body};
pub use request::HttpFetcher;

/// A completed HTTP exchange after all redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL of the last response in the redirect chain
    pub url: Url,
    /// Status code of the last response
    pub status: u16,
    /// Response body, capped at `MAX_RESPONSE_BODY_SIZE`
    pub body: Vec<u8>,
}

/// Performs an HTTP GET with a hard deadline.
///
/// Implementations must be safe to share across concurrently running checks.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}
