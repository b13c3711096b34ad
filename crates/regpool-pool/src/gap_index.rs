//! The size-ordered index over a pool's free segments.
//!
//! Entries are kept compact (no holes) and sorted by `(size, offset)`
//! ascending. Insertion appends then bubbles the new entry up by one swap
//! at a time — cheap because each insertion perturbs an already-sorted
//! sequence by exactly one element — and removal left-shifts the tail.

use regpool_core::{GrowthPolicy, NodeIdx, PoolError};

use crate::growvec::GrowVec;

/// One entry in the gap index: a free segment's size, address, and node
/// identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GapEntry {
    /// Size of the free segment.
    pub size: usize,
    /// Address of the free segment, used only to break size ties.
    pub offset: usize,
    /// Stable identity of the free segment in the node heap.
    pub node: NodeIdx,
}

/// A dynamic vector of [`GapEntry`], sorted ascending by `(size, offset)`.
pub struct GapIndex {
    entries: GrowVec<GapEntry>,
    len: usize,
}

impl GapIndex {
    /// Create an empty gap index with the given growth policy.
    pub fn new(policy: GrowthPolicy) -> Self {
        Self {
            entries: GrowVec::new(policy),
            len: 0,
        }
    }

    /// Number of free segments currently tracked.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no free segments are tracked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total entry capacity.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Insert a newly-free segment, growing first if the fill factor would
    /// otherwise be exceeded.
    pub fn insert(&mut self, size: usize, offset: usize, node: NodeIdx) -> Result<(), PoolError> {
        self.entries.ensure_capacity(self.len)?;
        let mut i = self.len;
        self.entries.set(i, GapEntry { size, offset, node });
        self.len += 1;

        while i > 0 {
            let prev = *self.entries.get(i - 1);
            let cur = *self.entries.get(i);
            if (cur.size, cur.offset) >= (prev.size, prev.offset) {
                break;
            }
            self.entries.set(i - 1, cur);
            self.entries.set(i, prev);
            i -= 1;
        }
        Ok(())
    }

    /// Remove the entry referencing `node`.
    ///
    /// Fails if no entry references `node`.
    pub fn remove(&mut self, node: NodeIdx) -> Result<(), PoolError> {
        let pos = (0..self.len)
            .find(|&i| self.entries.get(i).node == node)
            .ok_or_else(|| PoolError::fail(format!("{node} not present in gap index")))?;
        for i in pos..self.len - 1 {
            let next = *self.entries.get(i + 1);
            self.entries.set(i, next);
        }
        self.len -= 1;
        self.entries.set(self.len, GapEntry::default());
        Ok(())
    }

    /// The first entry with `size >= k`: the smallest qualifying gap,
    /// lowest address on a size tie.
    pub fn search_best_fit(&self, k: usize) -> Option<GapEntry> {
        (0..self.len)
            .map(|i| *self.entries.get(i))
            .find(|e| e.size >= k)
    }

    /// Iterate entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = GapEntry> + '_ {
        (0..self.len).map(move |i| *self.entries.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> GrowthPolicy {
        GrowthPolicy::new(8, 0.75, 2)
    }

    #[test]
    fn insert_keeps_ascending_size_order() {
        let mut idx = GapIndex::new(policy());
        idx.insert(50, 0, NodeIdx(0)).unwrap();
        idx.insert(10, 50, NodeIdx(1)).unwrap();
        idx.insert(30, 60, NodeIdx(2)).unwrap();
        let sizes: Vec<usize> = idx.iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![10, 30, 50]);
    }

    #[test]
    fn equal_size_ties_break_by_offset() {
        let mut idx = GapIndex::new(policy());
        idx.insert(10, 100, NodeIdx(0)).unwrap();
        idx.insert(10, 10, NodeIdx(1)).unwrap();
        let offsets: Vec<usize> = idx.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![10, 100]);
    }

    #[test]
    fn remove_shifts_tail_left() {
        let mut idx = GapIndex::new(policy());
        idx.insert(10, 0, NodeIdx(0)).unwrap();
        idx.insert(20, 10, NodeIdx(1)).unwrap();
        idx.insert(30, 30, NodeIdx(2)).unwrap();
        idx.remove(NodeIdx(1)).unwrap();
        assert_eq!(idx.len(), 2);
        let nodes: Vec<NodeIdx> = idx.iter().map(|e| e.node).collect();
        assert_eq!(nodes, vec![NodeIdx(0), NodeIdx(2)]);
    }

    #[test]
    fn remove_missing_node_fails() {
        let mut idx = GapIndex::new(policy());
        idx.insert(10, 0, NodeIdx(0)).unwrap();
        assert!(idx.remove(NodeIdx(9)).is_err());
    }

    #[test]
    fn search_best_fit_returns_smallest_qualifying() {
        let mut idx = GapIndex::new(policy());
        idx.insert(70, 0, NodeIdx(0)).unwrap();
        idx.insert(10, 70, NodeIdx(1)).unwrap();
        let found = idx.search_best_fit(5).unwrap();
        assert_eq!(found.size, 10);
    }

    #[test]
    fn search_best_fit_none_when_nothing_qualifies() {
        let mut idx = GapIndex::new(policy());
        idx.insert(5, 0, NodeIdx(0)).unwrap();
        assert!(idx.search_best_fit(10).is_none());
    }
}
