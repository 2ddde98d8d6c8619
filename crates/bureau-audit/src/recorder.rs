use std::collections::{BTreeMap, BTreeSet};

use bureau_types::{Category, EntityId, Occurrence};

/// Last-seen occurrence of every category, per agent.
///
/// Owned and mutated only by the scanning pass; read-only afterwards.
/// Entries are never removed. A repeated `(id, category)` overwrites the
/// earlier occurrence, so only the latest line number and timestamp survive.
#[derive(Clone, Debug, Default)]
pub struct LifecycleRecorder {
    entities: BTreeMap<EntityId, BTreeMap<Category, Occurrence>>,
}

impl LifecycleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `occurrence`, returning the one it displaced, if any.
    pub fn record(&mut self, occurrence: Occurrence) -> Option<Occurrence> {
        self.entities
            .entry(occurrence.entity_id.clone())
            .or_default()
            .insert(occurrence.category, occurrence)
    }

    /// Every id with at least one recorded occurrence, in numeric order.
    pub fn entity_ids(&self) -> BTreeSet<EntityId> {
        self.entities.keys().cloned().collect()
    }

    /// Recorded occurrences for `id`, keyed in category declaration order.
    pub fn occurrences_for(&self, id: &EntityId) -> Option<&BTreeMap<Category, Occurrence>> {
        self.entities.get(id)
    }

    /// The recorded occurrence of `category` for `id`.
    pub fn occurrence(&self, id: &EntityId, category: Category) -> Option<&Occurrence> {
        self.entities.get(id).and_then(|by_cat| by_cat.get(&category))
    }

    /// Number of distinct ids with an occurrence of `category`.
    pub fn ids_for(&self, category: Category) -> usize {
        self.entities
            .values()
            .filter(|by_cat| by_cat.contains_key(&category))
            .count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
