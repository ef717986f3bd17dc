//! DNS resolution.
//!
//! This module provides the [`Resolve`] seam used by the verifier, with a
//! `hickory-resolver` backed implementation for production and a static
//! host table for offline runs and tests.
//!
//! Addresses are always returned sorted and de-duplicated so that two
//! checks against the same DNS answer produce equal address lists.

mod resolution;

// Re-export public API
pub use resolution::{resolve_host_addresses, HickoryResolver, Resolve, StaticResolver};

#[cfg(test)]
mod tests;
