//! Verification scope.
//!
//! Only in-scope domains go through DNS resolution and the marker protocol;
//! all other domains merely need to be reachable over HTTP. The predicate is
//! injected into the [`Verifier`](crate::check::Verifier).

/// Decides whether a domain gets the full marker verification.
pub trait DomainScope: Send + Sync {
    fn in_scope(&self, domain: &str) -> bool;
}

impl<F> DomainScope for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn in_scope(&self, domain: &str) -> bool {
        self(domain)
    }
}

/// In scope when the last DNS label equals `suffix` (ASCII case-insensitive).
#[derive(Debug, Clone)]
pub struct SuffixScope {
    suffix: String,
}

impl SuffixScope {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.trim_start_matches('.').to_ascii_lowercase(),
        }
    }
}

impl DomainScope for SuffixScope {
    fn in_scope(&self, domain: &str) -> bool {
        domain
            .trim_end_matches('.')
            .rsplit('.')
            .next()
            .is_some_and(|label| label.eq_ignore_ascii_case(&self.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_scope() {
        let scope = SuffixScope::new("hiv");
        assert!(scope.in_scope("example.hiv"));
        assert!(scope.in_scope("EXAMPLE.HIV"));
        assert!(scope.in_scope("www.example.hiv."));
        assert!(!scope.in_scope("example.com"));
        // Only whole labels count
        assert!(!scope.in_scope("archiv"));
        assert!(!scope.in_scope("example.archiv"));
    }

    #[test]
    fn test_suffix_scope_leading_dot() {
        assert!(SuffixScope::new(".hiv").in_scope("example.hiv"));
    }

    #[test]
    fn test_closure_scope() {
        let scope = |domain: &str| domain == "only.this";
        assert!(scope.in_scope("only.this"));
        assert!(!scope.in_scope("other.this"));
    }
}
