use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::entity_id::EntityId;

/// One log line matched against one category.
///
/// `timestamp` is kept as the raw log text; it is only parsed when a report
/// needs an elapsed time. `line` is 1-based and runs on across input files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub category: Category,
    pub entity_id: EntityId,
    pub timestamp: String,
    pub line: usize,
}

impl Occurrence {
    pub fn new(
        category: Category,
        entity_id: EntityId,
        timestamp: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            category,
            entity_id,
            timestamp: timestamp.into(),
            line,
        }
    }
}
