//! Immutable audit configuration data: which lines belong to which lifecycle
//! stage, and which stage orderings are allowed.
//!
//! A [`Catalog`] is built once at startup and handed by reference to the
//! extractor, path builder and validator. Nothing mutates it afterwards.

use bureau_types::{CanonicalPath, Category};
use regex::Regex;

use crate::error::AuditError;

/// Regex source for a bare bureau log timestamp.
pub const TIMESTAMP_PATTERN: &str = r"\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}:\d{3}";

/// Logger name the bureau registry writes under.
pub const BUREAU_LOGGER: &str = "com.threerings.narya.bureau";

/// Compiled line pattern for one category.
///
/// Captures `time` (the leading timestamp) and `id` (the `oid` digits).
#[derive(Clone, Debug)]
pub struct CategoryMatcher {
    category: Category,
    regex: Regex,
}

impl CategoryMatcher {
    /// Build the pattern `<timestamp> <level> <logger>: <phrase> [oid=<digits>`.
    pub fn new(category: Category, logger: &str) -> Result<Self, AuditError> {
        let pattern = format!(
            r"(?P<time>{TIMESTAMP_PATTERN}) \w+ {}: {} \[oid=(?P<id>\d+)",
            regex::escape(logger),
            regex::escape(category.phrase()),
        );
        Ok(Self {
            category,
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// The fixed set of category matchers and canonical lifecycles.
#[derive(Clone, Debug)]
pub struct Catalog {
    matchers: Vec<CategoryMatcher>,
    canonical_paths: Vec<CanonicalPath>,
    timestamp: Regex,
}

impl Catalog {
    /// The bureau registry catalog: all 7 categories under
    /// [`BUREAU_LOGGER`] and the 5 known-valid lifecycles.
    pub fn bureau() -> Result<Self, AuditError> {
        Self::new(BUREAU_LOGGER, canonical_lifecycles())
    }

    /// Catalog with the standard categories under a different logger name
    /// and a caller-chosen lifecycle list.
    pub fn new(logger: &str, canonical_paths: Vec<CanonicalPath>) -> Result<Self, AuditError> {
        let matchers = Category::ALL
            .iter()
            .map(|&category| CategoryMatcher::new(category, logger))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            matchers,
            canonical_paths,
            timestamp: Regex::new(TIMESTAMP_PATTERN)?,
        })
    }

    /// Matchers in declaration order.
    pub fn matchers(&self) -> &[CategoryMatcher] {
        &self.matchers
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.matchers.iter().map(CategoryMatcher::category)
    }

    pub fn canonical_paths(&self) -> &[CanonicalPath] {
        &self.canonical_paths
    }

    pub fn timestamp_regex(&self) -> &Regex {
        &self.timestamp
    }
}

/// The allowed agent lifecycles, in catalog order.
///
/// 1. Pending, Destroy
/// 2. Pending, Delayed Creation, Confirmed created, Destroy, Confirmed destruction
/// 3. Pending, Delayed Creation, Destroy, Confirmed created, Confirmed destruction
/// 4. Immediate Creation, Confirmed created, Destroy, Confirmed destruction
/// 5. Immediate Creation, Destroy, Confirmed created, Confirmed destruction
pub fn canonical_lifecycles() -> Vec<CanonicalPath> {
    use Category::*;
    vec![
        CanonicalPath::new([Pending, Destroy]),
        CanonicalPath::new([
            Pending,
            DelayedCreation,
            ConfirmedCreated,
            Destroy,
            ConfirmedDestruction,
        ]),
        CanonicalPath::new([
            Pending,
            DelayedCreation,
            Destroy,
            ConfirmedCreated,
            ConfirmedDestruction,
        ]),
        CanonicalPath::new([ImmediateCreation, ConfirmedCreated, Destroy, ConfirmedDestruction]),
        CanonicalPath::new([ImmediateCreation, Destroy, ConfirmedCreated, ConfirmedDestruction]),
    ]
}
