use bureau_types::{EntityId, LifecyclePath};

use crate::catalog::Catalog;
use crate::recorder::LifecycleRecorder;

/// Reconstruct the observed lifecycle of `id`.
///
/// Categories are gathered in catalog declaration order, then stable-sorted
/// by the line they were last seen on, so a line-number tie keeps
/// declaration order. An id the recorder never saw yields the empty path.
pub fn build_path(catalog: &Catalog, recorder: &LifecycleRecorder, id: &EntityId) -> LifecyclePath {
    let Some(by_category) = recorder.occurrences_for(id) else {
        return LifecyclePath::default();
    };

    let mut seen: Vec<_> = catalog
        .categories()
        .filter_map(|category| by_category.get(&category).map(|occ| (category, occ.line)))
        .collect();
    seen.sort_by_key(|&(_, line)| line);

    seen.into_iter().map(|(category, _)| category).collect()
}
