//! Click-counter marker detection.
//!
//! Scans raw HTML bytes for the click-counter `<script>` tag and the
//! click-counter redirect `<iframe>`. Matching is regex-based and works on
//! malformed or partial markup. No DOM is built and no I/O is performed.
//!
//! Attribute values are recognised in three forms: `src="…"`, `src='…'`
//! and unquoted `src=…`.

use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

use crate::config::{CLICKCOUNTER_IFRAME_ID, CLICKCOUNTER_SCRIPT};

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<script[^>]+>"));
static IFRAME_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"<iframe[^>]+>"));
static SRC_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"src="([^"]+)"|src='([^']+)'|src=([^\s"'>]+)"#));
// The src alternatives mirror markup seen in the wild where the iframe id
// ended up in the src attribute.
static IFRAME_ID: LazyLock<Regex> = LazyLock::new(|| {
    let id = regex::escape(CLICKCOUNTER_IFRAME_ID);
    compile(&format!(
        r#"id="{id}"|id='{id}'|id={id}[\s/>]|src='{id}'|src={id}\W"#
    ))
});

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        // Patterns are literals; a failure here is a programming error.
        Err(e) => panic!("invalid built-in markup pattern {pattern:?}: {e}"),
    }
}

/// Result of scanning a body for the click-counter iframe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IframeScan {
    /// At least one iframe carries the click-counter identifier.
    pub present: bool,
    /// `src` of the last identified iframe that has one.
    pub target: Option<String>,
}

/// Extracts the `src` attribute value of a single tag, if any.
pub fn extract_src(tag: &[u8]) -> Option<String> {
    let captures = SRC_ATTRIBUTE.captures(tag)?;
    first_group(&captures)
}

fn first_group(captures: &Captures<'_>) -> Option<String> {
    (1..=3)
        .filter_map(|i| captures.get(i))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .find(|value| !value.is_empty())
}

/// Returns true if any `<script>` tag references `script_url` exactly.
pub fn has_script(body: &[u8], script_url: &str) -> bool {
    SCRIPT_TAG
        .find_iter(body)
        .filter_map(|tag| extract_src(tag.as_bytes()))
        .any(|src| src == script_url)
}

/// Returns true if the body embeds the click-counter script.
pub fn has_clickcounter_script(body: &[u8]) -> bool {
    has_script(body, CLICKCOUNTER_SCRIPT)
}

/// Scans all `<iframe>` tags for the click-counter identifier.
///
/// When several identified iframes carry a `src`, the last one wins.
pub fn scan_iframe(body: &[u8]) -> IframeScan {
    let mut scan = IframeScan::default();
    for tag in IFRAME_TAG.find_iter(body) {
        let tag = tag.as_bytes();
        if !IFRAME_ID.is_match(tag) {
            continue;
        }
        scan.present = true;
        if let Some(src) = extract_src(tag) {
            scan.target = Some(src);
        }
    }
    scan
}
