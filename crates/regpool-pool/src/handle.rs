//! Allocation handles returned to callers of `alloc`.

use std::fmt;

use regpool_core::{NodeIdx, PoolId};

/// Identifies one live allocation: which pool it belongs to, which node
/// heap slot backs it, and its byte range.
///
/// Identity equals the underlying segment for the lifetime of the
/// allocation — the handle stays valid until the matching `free`, and a
/// stale handle passed to `free` a second time is rejected rather than
/// aliasing a later allocation that happens to reuse the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AllocHandle {
    pool: PoolId,
    node: NodeIdx,
    offset: usize,
    size: usize,
}

impl AllocHandle {
    pub(crate) fn new(pool: PoolId, node: NodeIdx, offset: usize, size: usize) -> Self {
        Self {
            pool,
            node,
            offset,
            size,
        }
    }

    /// The pool this allocation belongs to.
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// The node heap slot backing this allocation.
    pub(crate) fn node(&self) -> NodeIdx {
        self.node
    }

    /// Byte offset of this allocation within its pool's region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Size of this allocation in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for AllocHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AllocHandle({}, {}, off={}, size={})",
            self.pool, self.node, self.offset, self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_exposes_offset_and_size() {
        let h = AllocHandle::new(PoolId(0), NodeIdx(3), 128, 64);
        assert_eq!(h.offset(), 128);
        assert_eq!(h.size(), 64);
        assert_eq!(h.pool(), PoolId(0));
    }
}
