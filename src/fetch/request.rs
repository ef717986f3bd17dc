//! `reqwest`-backed fetcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;
use crate::fetch::{Fetch, FetchedPage};

/// Fetcher over a shared, connection-pooled `reqwest::Client`.
///
/// Redirect following is configured on the client (see
/// `initialization::init_client`). The whole exchange, body read included,
/// runs under `timeout`, so a server that trickles bytes or never closes the
/// connection still fails in bounded time.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(client: Arc<reqwest::Client>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn get(&self, url: &Url) -> Result<FetchedPage, reqwest::Error> {
        let mut response = self.client.get(url.clone()).send().await?;
        let final_url = response.url().clone();
        let status = response.status().as_u16();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if append_capped(&mut body, &chunk, MAX_RESPONSE_BODY_SIZE) {
                debug!("Body of {final_url} truncated at {MAX_RESPONSE_BODY_SIZE} bytes");
                break;
            }
        }

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }

    fn timeout_error(&self, url: &Url) -> FetchError {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_secs: self.timeout.as_secs(),
        }
    }
}

/// Appends `chunk` to `body` up to `cap` bytes.
///
/// Returns true when bytes were dropped.
pub(crate) fn append_capped(body: &mut Vec<u8>, chunk: &[u8], cap: usize) -> bool {
    let remaining = cap.saturating_sub(body.len());
    if chunk.len() > remaining {
        body.extend_from_slice(&chunk[..remaining]);
        return true;
    }
    body.extend_from_slice(chunk);
    false
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        match tokio::time::timeout(self.timeout, self.get(url)).await {
            Ok(Ok(page)) => Ok(page),
            Ok(Err(e)) if e.is_timeout() => Err(self.timeout_error(url)),
            Ok(Err(e)) if e.is_connect() => Err(FetchError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Ok(Err(source)) => Err(FetchError::Request {
                url: url.to_string(),
                source,
            }),
            Err(_) => Err(self.timeout_error(url)),
        }
    }
}
