use serde::{Deserialize, Serialize};
use std::fmt;

/// A named stage in an agent's lifecycle as logged by the bureau registry.
///
/// Variant order is the declaration order: it fixes the scan order of the
/// extractor and breaks ties when two stages share a line number. It says
/// nothing about which orderings are valid; that is the canonical catalog's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Bureau was already up, so the agent was created right away.
    ImmediateCreation,
    /// Bureau came up and the pending agent is now being created.
    DelayedCreation,
    /// Bureau acknowledged the agent started.
    ConfirmedCreated,
    /// Bureau reported that creating the agent failed.
    FailedCreation,
    /// Bureau was not up yet; the agent is queued.
    Pending,
    /// Destruction requested.
    Destroy,
    /// Bureau acknowledged the agent is gone.
    ConfirmedDestruction,
}

impl Category {
    /// All 7 categories in declaration order.
    pub const ALL: [Category; 7] = [
        Self::ImmediateCreation,
        Self::DelayedCreation,
        Self::ConfirmedCreated,
        Self::FailedCreation,
        Self::Pending,
        Self::Destroy,
        Self::ConfirmedDestruction,
    ];

    /// Human-readable name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImmediateCreation => "Immediate Creation",
            Self::DelayedCreation => "Delayed Creation",
            Self::ConfirmedCreated => "Confirmed created",
            Self::FailedCreation => "Failed creation",
            Self::Pending => "Pending",
            Self::Destroy => "Destroy",
            Self::ConfirmedDestruction => "Confirmed destruction",
        }
    }

    /// The literal message the bureau registry logs for this stage.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::ImmediateCreation => "Bureau ready, sending createAgent",
            Self::DelayedCreation => "Creating agent",
            Self::ConfirmedCreated => "Agent creation confirmed",
            Self::FailedCreation => "Agent creation failed",
            Self::Pending => "Bureau not ready, pending agent",
            Self::Destroy => "Destroying agent",
            Self::ConfirmedDestruction => "Agent destruction confirmed",
        }
    }

    /// Whether this stage starts a lifecycle (either creation flavour).
    pub fn is_creation(&self) -> bool {
        matches!(self, Self::ImmediateCreation | Self::DelayedCreation)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
