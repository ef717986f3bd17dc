//! Domain verification state machine.
//!
//! A check walks `DnsCheck → Fetch → (WwwFallbackRetry) → MarkerCheck →
//! IframeCheck → (RecursiveTargetCheck) → Done`:
//!
//! 1. In-scope domains must resolve in DNS.
//! 2. The start URL (default `http://www.<domain>/`) must load with status 200
//!    after redirects. If the fetch fails and the URL host starts with `www.`,
//!    the whole check restarts once against the same URL without `www.`.
//! 3. Out-of-scope domains are done here.
//! 4. In-scope pages must embed the click-counter script.
//! 5. A click-counter iframe must carry a `src`; its target is checked by a
//!    nested, non-recursive check of its own.
//! 6. The final host must still be the requested domain.
//!
//! The verifier holds no mutable state; concurrent checks each build their
//! own outcome.

mod outcome;
mod scope;

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::{debug, info, warn};
use url::Url;

use crate::dns::Resolve;
use crate::error_handling::CheckError;
use crate::fetch::{persist_body, truncate_body, Fetch};
use crate::markup;

// Re-export public API
pub use outcome::{VerificationOutcome, VerificationRequest};
pub use scope::{DomainScope, SuffixScope};

/// Runs domain checks against injected DNS, HTTP and scope collaborators.
#[derive(Clone)]
pub struct Verifier {
    resolver: Arc<dyn Resolve>,
    fetcher: Arc<dyn Fetch>,
    scope: Arc<dyn DomainScope>,
}

impl Verifier {
    pub fn new(
        resolver: Arc<dyn Resolve>,
        fetcher: Arc<dyn Fetch>,
        scope: Arc<dyn DomainScope>,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            scope,
        }
    }

    /// Checks a domain and returns its outcome.
    ///
    /// Never fails: every problem is recorded as the outcome's `error`.
    pub async fn verify(&self, request: &VerificationRequest) -> VerificationOutcome {
        let outcome = match request.start_url() {
            Ok(start) => self.attempt(request, start, false).await,
            Err(source) => {
                let mut outcome = VerificationOutcome::new(&request.domain, None);
                outcome.fail(CheckError::InvalidDomain {
                    domain: request.domain.clone(),
                    source,
                });
                outcome
            }
        };

        match &outcome.error {
            None => info!("[{}] A-OK", outcome.domain),
            Some(e) => warn!("[{}] PROBLEM: {}", outcome.domain, e),
        }
        outcome
    }

    /// One pass of the state machine starting at `start`.
    ///
    /// Boxed because the www fallback and the iframe target check re-enter it.
    fn attempt<'a>(
        &'a self,
        request: &'a VerificationRequest,
        start: Url,
        www_fallback_attempted: bool,
    ) -> BoxFuture<'a, VerificationOutcome> {
        async move {
            let mut outcome = VerificationOutcome::new(&request.domain, Some(start.clone()));
            let Err(error) = self.run(request, &start, &mut outcome).await else {
                return outcome;
            };

            if error.is_fetch_failure() && !www_fallback_attempted {
                if let Some(fallback) = without_www(&start) {
                    info!(
                        "[{}] {}; retrying without www: {}",
                        request.domain, error, fallback
                    );
                    return self.attempt(request, fallback, true).await;
                }
            }

            outcome.fail(error);
            outcome
        }
        .boxed()
    }

    async fn run(
        &self,
        request: &VerificationRequest,
        start: &Url,
        outcome: &mut VerificationOutcome,
    ) -> Result<(), CheckError> {
        let domain = request.domain.as_str();
        let in_scope = self.scope.in_scope(domain);

        if in_scope {
            let mut addresses = self.resolver.lookup_host(domain).await?;
            addresses.sort_unstable();
            addresses.dedup();
            outcome.dns_ok = true;
            outcome.addresses = addresses;
        }

        info!("[{domain}] Fetching {start}");
        let page = self.fetcher.fetch(start).await?;
        if page.url != *start {
            info!("[{domain}] Redirect to: {}", page.url);
        }
        outcome.url = Some(page.url.clone());
        outcome.status_code = Some(page.status);
        let body = truncate_body(page.body);
        if request.save_body {
            outcome.body_file = persist_body(domain, &body);
        }
        info!("[{domain}] Status {}", page.status);
        if page.status != 200 {
            return Err(CheckError::Status {
                url: page.url.to_string(),
                status: page.status,
            });
        }

        if !in_scope {
            debug!("[{domain}] Not in scope, skipping marker checks");
            return Ok(());
        }

        if !markup::has_clickcounter_script(&body) {
            return Err(CheckError::MarkerMissing);
        }
        outcome.script_present = true;
        info!("[{domain}] click-counter script installed");

        let iframe = markup::scan_iframe(&body);
        if iframe.present {
            outcome.iframe_present = true;
            info!("[{domain}] iframe present");
            match &iframe.target {
                Some(src) => info!("[{domain}] iframe src: {src}"),
                None => return Err(CheckError::IframeMissingSrc),
            }
        }
        outcome.iframe_target = iframe.target.clone();

        if let Some(src) = iframe.target.as_deref() {
            if !request.is_nested() {
                self.check_iframe_target(src, &page.url, outcome).await?;
            }
        }

        ensure_same_domain(domain, &page.url)
    }

    async fn check_iframe_target(
        &self,
        src: &str,
        page_url: &Url,
        outcome: &mut VerificationOutcome,
    ) -> Result<(), CheckError> {
        let target = resolve_iframe_target(src, page_url)?;
        let nested = VerificationRequest::nested(target.clone());
        info!("[{}] Checking iframe target {}", outcome.domain, target);

        let nested_outcome = self.attempt(&nested, target.clone(), false).await;
        match nested_outcome.error {
            None => {
                outcome.iframe_target_ok = true;
                Ok(())
            }
            Some(error) => {
                outcome.iframe_target_ok = false;
                Err(CheckError::IframeTarget {
                    target: target.to_string(),
                    source: Box::new(error),
                })
            }
        }
    }
}

/// Same URL with one leading `www.` removed from the host, if it has one.
fn without_www(url: &Url) -> Option<Url> {
    let host = url.host_str()?;
    let bare = host.strip_prefix("www.")?;
    if bare.is_empty() {
        return None;
    }
    let mut fallback = url.clone();
    fallback.set_host(Some(bare)).ok()?;
    Some(fallback)
}

/// Parses an iframe `src`, inheriting the page's scheme for `//host/…` forms.
fn resolve_iframe_target(src: &str, page_url: &Url) -> Result<Url, CheckError> {
    let candidate = if src.starts_with("//") {
        format!("{}:{}", page_url.scheme(), src)
    } else {
        src.to_string()
    };
    let target = Url::parse(&candidate).map_err(|e| CheckError::TargetParse {
        target: src.to_string(),
        reason: e.to_string(),
    })?;
    if target.host_str().map_or(true, str::is_empty) {
        return Err(CheckError::TargetParse {
            target: src.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(target)
}

/// Host comparison ignoring case, port, a trailing dot and one leading `www.`.
fn same_site(domain: &str, host: &str) -> bool {
    fn bare(name: &str) -> String {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        match name.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => name,
        }
    }
    bare(domain) == bare(host)
}

fn ensure_same_domain(domain: &str, final_url: &Url) -> Result<(), CheckError> {
    let host = final_url.host_str().unwrap_or_default();
    if same_site(domain, host) {
        Ok(())
    } else {
        Err(CheckError::DomainMismatch {
            expected: domain.to_string(),
            host: host.to_string(),
        })
    }
}
