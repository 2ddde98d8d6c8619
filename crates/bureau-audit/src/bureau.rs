use std::fmt;

use bureau_types::{EntityId, LifecyclePath};
use serde::{Deserialize, Serialize};

/// The worker process that hosts an agent, as far as the audit can tell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bureau {
    Known(String),
    Unknown,
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(name) => f.write_str(name),
            Self::Unknown => f.write_str("??"),
        }
    }
}

/// Resolves which bureau owns an agent.
pub trait BureauLookup {
    fn bureau_for(&self, id: &EntityId, path: &LifecyclePath) -> Bureau;
}

/// The log lines carry no reliable agent-to-bureau mapping, so every agent
/// is reported against an unknown bureau.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnresolvedBureau;

impl BureauLookup for UnresolvedBureau {
    fn bureau_for(&self, _id: &EntityId, _path: &LifecyclePath) -> Bureau {
        Bureau::Unknown
    }
}
