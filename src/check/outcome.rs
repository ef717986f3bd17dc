//! Verification request and outcome types.

use std::net::IpAddr;
use std::path::PathBuf;

use url::{Host, Url};

use crate::error_handling::CheckError;

/// Input of a single domain check.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// Normalized domain name (trimmed, lowercase, no trailing dot)
    pub domain: String,
    /// Start URL; defaults to `http://www.<domain>/`
    pub target: Option<Url>,
    /// Keep the fetched body in a temp file
    pub save_body: bool,
    nested: bool,
}

impl VerificationRequest {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: normalize_domain(domain),
            target: None,
            save_body: false,
            nested: false,
        }
    }

    pub fn with_target(mut self, target: Url) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_save_body(mut self, save_body: bool) -> Self {
        self.save_body = save_body;
        self
    }

    /// Request for the one-hop check of an iframe target.
    ///
    /// Nested requests never retain bodies and never follow further iframes.
    pub(crate) fn nested(target: Url) -> Self {
        let host = target.host_str().unwrap_or_default().to_string();
        Self {
            domain: normalize_domain(&host),
            target: Some(target),
            save_body: false,
            nested: true,
        }
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// URL the first fetch goes to.
    pub fn start_url(&self) -> Result<Url, url::ParseError> {
        match &self.target {
            Some(url) => Ok(url.clone()),
            None => Url::parse(&format!("http://www.{}/", self.domain)),
        }
    }
}

/// Trimmed, lowercase ASCII form; internationalized names become punycode.
///
/// Names that are not valid hosts are kept as typed so building the start
/// URL reports them.
fn normalize_domain(domain: &str) -> String {
    let name = domain.trim().trim_end_matches('.');
    match Host::parse(name) {
        Ok(Host::Domain(ascii)) => ascii,
        _ => name.to_ascii_lowercase(),
    }
}

/// Result of a single domain check.
///
/// Built fresh for every check and not modified after the verifier returns.
/// Partial results (e.g. DNS succeeded, fetch failed) are kept for diagnosis
/// even when the outcome is invalid.
#[derive(Debug)]
pub struct VerificationOutcome {
    pub domain: String,
    pub dns_ok: bool,
    /// Resolved addresses, sorted
    pub addresses: Vec<IpAddr>,
    /// Final URL reached after redirects and the www fallback
    pub url: Option<Url>,
    pub status_code: Option<u16>,
    pub script_present: bool,
    pub iframe_present: bool,
    /// Raw `src` of the click-counter iframe
    pub iframe_target: Option<String>,
    /// Set only when the nested check of the iframe target succeeded
    pub iframe_target_ok: bool,
    pub valid: bool,
    /// Temp file holding the fetched body, when retained
    pub body_file: Option<PathBuf>,
    /// Why the outcome is invalid
    pub error: Option<CheckError>,
}

impl VerificationOutcome {
    /// Starts optimistic: valid until a step fails.
    pub(crate) fn new(domain: &str, url: Option<Url>) -> Self {
        Self {
            domain: domain.to_string(),
            dns_ok: false,
            addresses: Vec::new(),
            url,
            status_code: None,
            script_present: false,
            iframe_present: false,
            iframe_target: None,
            iframe_target_ok: false,
            valid: true,
            body_file: None,
            error: None,
        }
    }

    pub(crate) fn fail(&mut self, error: CheckError) {
        self.valid = false;
        self.error = Some(error);
    }

    /// Addresses as strings, in sorted order.
    pub fn address_strings(&self) -> Vec<String> {
        self.addresses.iter().map(ToString::to_string).collect()
    }
}
