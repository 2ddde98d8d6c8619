use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;

/// Observed stages for one agent, ordered by the log line they appeared on.
///
/// Each category appears at most once because the recorder keeps a single
/// occurrence per `(id, category)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifecyclePath(Vec<Category>);

impl LifecyclePath {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.0
    }

    pub fn last(&self) -> Option<Category> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LifecyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, category) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(category.name())?;
        }
        Ok(())
    }
}

impl FromIterator<Category> for LifecyclePath {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One allowed ordering of lifecycle stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPath(Vec<Category>);

impl CanonicalPath {
    pub fn new(categories: impl Into<Vec<Category>>) -> Self {
        Self(categories.into())
    }

    pub fn categories(&self) -> &[Category] {
        &self.0
    }

    /// Observed path is exactly this lifecycle.
    pub fn matches_exactly(&self, path: &LifecyclePath) -> bool {
        self.0.as_slice() == path.categories()
    }

    /// Observed path is consistent with this lifecycle so far. The empty
    /// path is a prefix of every lifecycle; an exact match also counts.
    pub fn has_prefix(&self, path: &LifecyclePath) -> bool {
        self.0.starts_with(path.categories())
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Category::name).collect();
        write!(f, "{}", names.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    #[test]
    fn lifecycle_path_displays_comma_separated_names() {
        let path = LifecyclePath::new(vec![Pending, DelayedCreation, ConfirmedCreated]);
        insta::assert_snapshot!(path, @"Pending, Delayed Creation, Confirmed created");
        assert_eq!(LifecyclePath::default().to_string(), "");
    }

    #[test]
    fn canonical_path_displays_arrows() {
        let canonical = CanonicalPath::new([Pending, Destroy]);
        assert_eq!(canonical.to_string(), "Pending -> Destroy");
    }

    #[test]
    fn prefix_and_exact_checks() {
        let canonical = CanonicalPath::new([ImmediateCreation, ConfirmedCreated, Destroy]);

        assert!(canonical.has_prefix(&LifecyclePath::default()));
        assert!(canonical.has_prefix(&LifecyclePath::new(vec![ImmediateCreation])));
        assert!(canonical.has_prefix(&LifecyclePath::new(vec![
            ImmediateCreation,
            ConfirmedCreated,
            Destroy
        ])));
        assert!(!canonical.has_prefix(&LifecyclePath::new(vec![ConfirmedCreated])));
        assert!(!canonical.has_prefix(&LifecyclePath::new(vec![
            ImmediateCreation,
            ConfirmedCreated,
            Destroy,
            ConfirmedDestruction
        ])));

        assert!(!canonical.matches_exactly(&LifecyclePath::new(vec![ImmediateCreation])));
        assert!(canonical.matches_exactly(&LifecyclePath::new(vec![
            ImmediateCreation,
            ConfirmedCreated,
            Destroy
        ])));
    }
}
