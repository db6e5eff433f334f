// Identity and version primitives shared by every entity kind.
//
// Purpose
// - EntityId: opaque identifier handed out by a store on first persistence.
// - VersionStamp: optimistic concurrency counter, starts at 0 and grows by one per update.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type VersionStamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
