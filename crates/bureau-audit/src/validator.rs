//! Lifecycle validation against the canonical catalog.
//!
//! A path is **exact** when it equals some canonical lifecycle, **partial**
//! when it is a prefix of one (the agent is still mid-lifecycle, or its
//! remaining lines never made it into the log), and **invalid** otherwise.
//! The empty path is a prefix of everything, so with a non-empty catalog it
//! is always partial.

use bureau_types::{CanonicalPath, LifecyclePath};
use serde::{Deserialize, Serialize};

/// Outcome of [`classify`]. `canonical` is the 0-based catalog index of the
/// first lifecycle that produced the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum PathMatch {
    Exact { canonical: usize },
    Partial { canonical: usize },
    Invalid,
}

impl PathMatch {
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// Classify `path` against `canonical_paths`.
///
/// Exact matches are searched across the whole catalog before prefixes, so
/// a path equal to a later lifecycle is never downgraded to partial by an
/// earlier one that merely extends it.
pub fn classify(path: &LifecyclePath, canonical_paths: &[CanonicalPath]) -> PathMatch {
    if let Some(canonical) = canonical_paths.iter().position(|c| c.matches_exactly(path)) {
        return PathMatch::Exact { canonical };
    }
    if let Some(canonical) = canonical_paths.iter().position(|c| c.has_prefix(path)) {
        return PathMatch::Partial { canonical };
    }
    PathMatch::Invalid
}
