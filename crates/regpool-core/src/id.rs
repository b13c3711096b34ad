//! Strongly-typed identifiers used across the regpool crates.

use std::fmt;

/// Identifies an open pool within a registry (explicit or global).
///
/// A `PoolId` is the index of the pool's slot in the registry's backing
/// vector. Slots are never reused after `close` — a stale `PoolId` for a
/// closed pool reliably resolves to nothing rather than aliasing a later,
/// unrelated pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(pub u32);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

impl From<u32> for PoolId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A stable slot index into a pool's node heap.
///
/// Node identity is expressed as an index rather than a reference so that
/// growing the node heap's backing storage never invalidates an
/// already-computed segment identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub u32);

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl From<u32> for NodeIdx {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl NodeIdx {
    /// This index as a `usize` for vector indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
