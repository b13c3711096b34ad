//! The pool manager: the per-pool allocation state machine.

use regpool_core::{HostAllocator, NodeIdx, PoolError, PoolId, Policy};

use crate::config::PoolConfig;
use crate::gap_index::GapIndex;
use crate::handle::AllocHandle;
use crate::node_heap::NodeHeap;
use crate::segment::Segment;

/// Owns one backing byte region plus the node heap and gap index that
/// track its layout, and implements `open`/`alloc`/`free`/`inspect`/`close`.
pub struct PoolManager {
    host: Box<dyn HostAllocator>,
    bytes: Box<[u8]>,
    node_heap: NodeHeap,
    gap_index: GapIndex,
    head: NodeIdx,
    total_size: usize,
    alloc_size: usize,
    num_allocs: usize,
    policy: Policy,
}

impl PoolManager {
    /// Acquire a region of `total_size` bytes from `host` and initialize it
    /// as a single free segment. Transactional: any failure releases every
    /// resource already acquired.
    pub fn open(
        total_size: usize,
        policy: Policy,
        host: Box<dyn HostAllocator>,
        config: PoolConfig,
    ) -> Result<Self, PoolError> {
        if total_size == 0 {
            return Err(PoolError::fail("open requires size > 0"));
        }

        let bytes = host.allocate_bytes(total_size)?;
        let mut node_heap = NodeHeap::new(config.node_heap);
        let mut gap_index = GapIndex::new(config.gap_index);

        let head = match node_heap
            .grow_if_needed()
            .and_then(|_| node_heap.acquire(Segment::free(0, total_size)))
        {
            Ok(idx) => idx,
            Err(e) => {
                host.free_bytes(bytes);
                return Err(e);
            }
        };

        if let Err(e) = gap_index.insert(total_size, 0, head) {
            node_heap.release(head);
            host.free_bytes(bytes);
            return Err(e);
        }

        Ok(Self {
            host,
            bytes,
            node_heap,
            gap_index,
            head,
            total_size,
            alloc_size: 0,
            num_allocs: 0,
            policy,
        })
    }

    /// Number of live allocations.
    pub fn num_allocs(&self) -> usize {
        self.num_allocs
    }

    /// Number of free segments.
    pub fn num_gaps(&self) -> usize {
        self.gap_index.len()
    }

    /// Sum of live allocated sizes.
    pub fn alloc_size(&self) -> usize {
        self.alloc_size
    }

    /// Total size of this pool's backing region.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// The placement policy this pool was opened with.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    fn iter_nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        let mut cursor = Some(self.head);
        std::iter::from_fn(move || {
            let idx = cursor?;
            cursor = self.node_heap.get(idx).next;
            Some(idx)
        })
    }

    fn select_segment(&self, k: usize) -> Option<NodeIdx> {
        match self.policy {
            Policy::FirstFit => self
                .iter_nodes()
                .find(|&idx| !self.node_heap.get(idx).allocated && self.node_heap.get(idx).size >= k),
            Policy::BestFit => self.gap_index.search_best_fit(k).map(|e| e.node),
        }
    }

    /// Satisfy an allocation request of `k` bytes, tagging the returned
    /// handle with `pool` (supplied by the caller — the manager itself
    /// does not know its own registry id).
    pub fn alloc(&mut self, pool: PoolId, k: usize) -> Result<AllocHandle, PoolError> {
        if k == 0 {
            return Err(PoolError::fail("alloc requires size > 0"));
        }
        if self.gap_index.is_empty() {
            return Err(PoolError::NotFound);
        }

        // Grow the node heap before scanning, not after selecting a gap —
        // a residue split always needs at most one fresh slot.
        self.node_heap.grow_if_needed()?;

        let chosen = self.select_segment(k).ok_or(PoolError::NotFound)?;

        self.gap_index.remove(chosen)?;

        let offset = self.node_heap.get(chosen).offset;
        let residue = self.node_heap.get(chosen).size - k;
        {
            let seg = self.node_heap.get_mut(chosen);
            seg.size = k;
            seg.allocated = true;
        }

        if residue > 0 {
            let next = self.node_heap.get(chosen).next;
            let residual = Segment {
                offset: offset + k,
                size: residue,
                allocated: false,
                prev: Some(chosen),
                next,
            };
            // Growth was already ensured above; a failure here means the
            // heap's capacity bookkeeping disagrees with reality, which is
            // an internal bug rather than a recoverable condition.
            let r = self.node_heap.acquire(residual)?;
            self.node_heap.get_mut(chosen).next = Some(r);
            if let Some(next_idx) = next {
                self.node_heap.get_mut(next_idx).prev = Some(r);
            }
            self.gap_index.insert(residue, offset + k, r)?;
        }

        self.num_allocs += 1;
        self.alloc_size += k;

        Ok(AllocHandle::new(pool, chosen, offset, k))
    }

    /// Release a previously-returned allocation, coalescing with any free
    /// neighbors.
    pub fn free(&mut self, handle: &AllocHandle) -> Result<(), PoolError> {
        let node = handle.node();
        let segment = self
            .node_heap
            .try_get(node)
            .ok_or_else(|| PoolError::fail(format!("{node} is not a live allocation")))?;
        if !segment.allocated {
            return Err(PoolError::fail(format!("{node} is not allocated")));
        }

        let freed_size = segment.size;
        self.node_heap.get_mut(node).allocated = false;
        self.num_allocs -= 1;
        self.alloc_size -= freed_size;

        let mut merged = node;

        if let Some(next) = self.node_heap.get(merged).next {
            if !self.node_heap.get(next).allocated {
                self.gap_index.remove(next)?;
                let next_size = self.node_heap.get(next).size;
                let next_next = self.node_heap.get(next).next;
                self.node_heap.get_mut(merged).size += next_size;
                self.node_heap.get_mut(merged).next = next_next;
                if let Some(nn) = next_next {
                    self.node_heap.get_mut(nn).prev = Some(merged);
                }
                self.node_heap.release(next);
            }
        }

        if let Some(prev) = self.node_heap.get(merged).prev {
            if !self.node_heap.get(prev).allocated {
                self.gap_index.remove(prev)?;
                let merged_size = self.node_heap.get(merged).size;
                let merged_next = self.node_heap.get(merged).next;
                self.node_heap.get_mut(prev).size += merged_size;
                self.node_heap.get_mut(prev).next = merged_next;
                if let Some(mn) = merged_next {
                    self.node_heap.get_mut(mn).prev = Some(prev);
                }
                self.node_heap.release(merged);
                merged = prev;
            }
        }

        let seg = self.node_heap.get(merged);
        self.gap_index.insert(seg.size, seg.offset, merged)?;
        Ok(())
    }

    /// Snapshot the segment list from head to tail as `(size, allocated)`
    /// pairs.
    pub fn inspect(&self) -> Vec<(usize, bool)> {
        self.iter_nodes()
            .map(|idx| {
                let seg = self.node_heap.get(idx);
                (seg.size, seg.allocated)
            })
            .collect()
    }

    /// Release this pool's byte region.
    ///
    /// Fails with `NotFreed` if the pool still has live allocations or has
    /// not coalesced down to a single gap, leaving every field untouched so
    /// the caller can free the rest and retry.
    pub fn close(&mut self) -> Result<(), PoolError> {
        if self.num_allocs != 0 || self.num_gaps() != 1 {
            return Err(PoolError::NotFreed {
                num_allocs: self.num_allocs,
                num_gaps: self.num_gaps(),
            });
        }
        self.host.free_bytes(std::mem::take(&mut self.bytes));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regpool_core::SystemHost;

    fn open(size: usize, policy: Policy) -> PoolManager {
        PoolManager::open(size, policy, Box::new(SystemHost), PoolConfig::default()).unwrap()
    }

    #[test]
    fn s1_two_allocs_leave_no_gaps() {
        let mut p = open(100, Policy::FirstFit);
        p.alloc(PoolId(0), 40).unwrap();
        p.alloc(PoolId(0), 60).unwrap();
        assert_eq!(p.inspect(), vec![(40, true), (60, true)]);
        assert_eq!(p.num_gaps(), 0);
        assert_eq!(p.alloc_size(), 100);
    }

    #[test]
    fn s2_free_first_alloc_leaves_one_gap() {
        let mut p = open(100, Policy::FirstFit);
        let a1 = p.alloc(PoolId(0), 40).unwrap();
        p.alloc(PoolId(0), 60).unwrap();
        p.free(&a1).unwrap();
        assert_eq!(p.inspect(), vec![(40, false), (60, true)]);
        assert_eq!(p.num_gaps(), 1);
    }

    #[test]
    fn s3_freeing_both_coalesces_to_whole_pool() {
        let mut p = open(100, Policy::FirstFit);
        let a1 = p.alloc(PoolId(0), 40).unwrap();
        let a2 = p.alloc(PoolId(0), 60).unwrap();
        p.free(&a1).unwrap();
        p.free(&a2).unwrap();
        assert_eq!(p.inspect(), vec![(100, false)]);
        assert_eq!(p.num_gaps(), 1);
    }

    #[test]
    fn s4_best_fit_picks_smallest_qualifying_gap() {
        let mut p = open(100, Policy::BestFit);
        let a = p.alloc(PoolId(0), 10).unwrap();
        let b = p.alloc(PoolId(0), 10).unwrap();
        p.alloc(PoolId(0), 10).unwrap();
        p.free(&b).unwrap();
        let d = p.alloc(PoolId(0), 5).unwrap();
        assert_eq!(d.offset(), b.offset());
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn s5_first_fit_reuses_freed_offset() {
        let mut p = open(100, Policy::FirstFit);
        let a = p.alloc(PoolId(0), 10).unwrap();
        p.alloc(PoolId(0), 10).unwrap();
        p.free(&a).unwrap();
        let c = p.alloc(PoolId(0), 10).unwrap();
        assert_eq!(c.offset(), a.offset());
    }

    #[test]
    fn s6_close_refuses_live_allocations_then_succeeds() {
        let mut p = open(100, Policy::FirstFit);
        let a = p.alloc(PoolId(0), 100).unwrap();
        assert!(matches!(p.close(), Err(PoolError::NotFreed { .. })));
        // a refused close leaves the manager intact: the same live
        // allocation can still be freed and the pool closed afterward.
        p.free(&a).unwrap();
        assert!(p.close().is_ok());
    }

    #[test]
    fn s7_no_fitting_gap_returns_not_found_and_state_is_unchanged() {
        let mut p = open(100, Policy::FirstFit);
        p.alloc(PoolId(0), 60).unwrap();
        let before = p.inspect();
        let err = p.alloc(PoolId(0), 50).unwrap_err();
        assert_eq!(err, PoolError::NotFound);
        assert_eq!(p.inspect(), before);
    }

    #[test]
    fn alloc_zero_is_a_fail_not_a_panic() {
        let mut p = open(100, Policy::FirstFit);
        let err = p.alloc(PoolId(0), 0).unwrap_err();
        assert!(matches!(err, PoolError::Fail { .. }));
    }

    #[test]
    fn free_unknown_handle_fails() {
        let mut p = open(100, Policy::FirstFit);
        let bogus = AllocHandle::new(PoolId(0), NodeIdx(99), 0, 10);
        assert!(p.free(&bogus).is_err());
    }
}
