use std::fmt;

use bureau_types::Category;
use serde::{Deserialize, Serialize};

use crate::recorder::LifecycleRecorder;

/// Aggregate lifecycle counts over a whole log.
///
/// Counts are distinct agent ids per category. `orphaned` is signed: more
/// confirmations or failures than creations (creation lines rotated out of
/// the log) drives it negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSummary {
    pub created: usize,
    pub started: usize,
    pub failed: usize,
    pub orphaned: i64,
}

impl LifecycleSummary {
    pub fn from_recorder(recorder: &LifecycleRecorder) -> Self {
        let created = Category::ALL
            .iter()
            .filter(|category| category.is_creation())
            .map(|&category| recorder.ids_for(category))
            .sum::<usize>();
        let started = recorder.ids_for(Category::ConfirmedCreated);
        let failed = recorder.ids_for(Category::FailedCreation);
        let orphaned = created as i64 - started as i64 - failed as i64;
        Self {
            created,
            started,
            failed,
            orphaned,
        }
    }

    /// Orphans as a percentage of creations; `0.0` when nothing was created.
    pub fn orphaned_percent(&self) -> f64 {
        if self.created == 0 {
            return 0.0;
        }
        self.orphaned as f64 * 100.0 / self.created as f64
    }
}

impl fmt::Display for LifecycleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} started, {} failed, {} orphaned, {:.1}%",
            self.created,
            self.started,
            self.failed,
            self.orphaned,
            self.orphaned_percent()
        )
    }
}
