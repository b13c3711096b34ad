//! Stable-identity backing store for a pool's segment records.
//!
//! Each slot is either [`Slot::Free`] (available for the next `split`) or
//! [`Slot::Used`] (currently part of the address-ordered segment list).
//! Identity is expressed as a [`NodeIdx`] into the backing [`GrowVec`] so
//! that growth never invalidates a segment reference held across an
//! operation. Freed slots are tracked on a free list and reused before the
//! heap is asked to grow further — the same slot-recycling shape as a
//! generational slab, minus the generation counter (segment identity here
//! is scoped to a single operation, never held across `alloc`/`free`
//! boundaries by a caller).

use regpool_core::{GrowthPolicy, NodeIdx, PoolError};

use crate::growvec::GrowVec;
use crate::segment::Segment;

#[derive(Clone, Debug, Default)]
enum Slot {
    #[default]
    Free,
    Used(Segment),
}

/// The node heap: a growable array of segment slots with stable indices.
pub struct NodeHeap {
    slots: GrowVec<Slot>,
    free_list: Vec<NodeIdx>,
    next_fresh: usize,
    used_nodes: usize,
}

impl NodeHeap {
    /// Create an empty node heap with the given growth policy.
    pub fn new(policy: GrowthPolicy) -> Self {
        Self {
            slots: GrowVec::new(policy),
            free_list: Vec::new(),
            next_fresh: 0,
            used_nodes: 0,
        }
    }

    /// Number of slots currently belonging to the segment list.
    pub fn used_nodes(&self) -> usize {
        self.used_nodes
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Grow the heap now if the fill factor would otherwise be exceeded by
    /// one more used slot. Called proactively at the start of `alloc`,
    /// before a free slot is actually needed, matching the source's
    /// resize-before-scan ordering.
    pub fn grow_if_needed(&mut self) -> Result<(), PoolError> {
        self.slots.ensure_capacity(self.used_nodes)
    }

    /// Acquire a free slot (from the free list, or freshly from capacity)
    /// and store `segment` in it.
    ///
    /// Returns `Fail` if no slot is available — this should not happen if
    /// [`grow_if_needed`](Self::grow_if_needed) was called first.
    pub fn acquire(&mut self, segment: Segment) -> Result<NodeIdx, PoolError> {
        let idx = if let Some(idx) = self.free_list.pop() {
            idx
        } else if self.next_fresh < self.slots.capacity() {
            let idx = NodeIdx(self.next_fresh as u32);
            self.next_fresh += 1;
            idx
        } else {
            return Err(PoolError::fail("node heap exhausted after growth"));
        };
        self.slots.set(idx.index(), Slot::Used(segment));
        self.used_nodes += 1;
        Ok(idx)
    }

    /// Release a slot back to the free list.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not currently hold a used segment — that would
    /// mean a caller is releasing a slot twice, which is an internal bug.
    pub fn release(&mut self, idx: NodeIdx) {
        match self.slots.get(idx.index()) {
            Slot::Used(_) => {}
            Slot::Free => panic!("releasing {idx} that is already free"),
        }
        self.slots.set(idx.index(), Slot::Free);
        self.free_list.push(idx);
        self.used_nodes -= 1;
    }

    /// Borrow the segment at `idx`, or `None` if the slot is free or out of
    /// range — the caller-facing way to reject a stale or foreign handle
    /// without panicking.
    pub fn try_get(&self, idx: NodeIdx) -> Option<&Segment> {
        if idx.index() >= self.slots.capacity() {
            return None;
        }
        match self.slots.get(idx.index()) {
            Slot::Used(seg) => Some(seg),
            Slot::Free => None,
        }
    }

    /// Mutably borrow the segment at `idx`, or `None` if the slot is free
    /// or out of range.
    pub fn try_get_mut(&mut self, idx: NodeIdx) -> Option<&mut Segment> {
        if idx.index() >= self.slots.capacity() {
            return None;
        }
        match self.slots.get_mut(idx.index()) {
            Slot::Used(seg) => Some(seg),
            Slot::Free => None,
        }
    }

    /// Borrow the segment at `idx`, which the caller has already
    /// established is a used slot (e.g. immediately after `acquire`).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a used slot.
    pub fn get(&self, idx: NodeIdx) -> &Segment {
        self.try_get(idx)
            .unwrap_or_else(|| panic!("{idx} is not a used slot"))
    }

    /// Mutably borrow the segment at `idx`, which the caller has already
    /// established is a used slot.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a used slot.
    pub fn get_mut(&mut self, idx: NodeIdx) -> &mut Segment {
        self.try_get_mut(idx)
            .unwrap_or_else(|| panic!("{idx} is not a used slot"))
    }
}
