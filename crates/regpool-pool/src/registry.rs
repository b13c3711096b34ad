//! An explicit, freely-instantiable table of open pools.
//!
//! `Registry` is the non-global half of the pool registry contract in the
//! spec's external interfaces: construct as many as you like, each
//! independent, each growing its own backing vector of pool slots. The
//! process-wide singleton facade (`regpool::global`) wraps exactly one of
//! these behind a mutex.

use regpool_core::{HostAllocator, PoolError, PoolId, Policy, SystemHost};

use crate::config::{PoolConfig, RegistryConfig};
use crate::growvec::GrowVec;
use crate::handle::AllocHandle;
use crate::manager::PoolManager;

/// A process-wide (or explicit, per-instance) table of open pool managers.
///
/// Slots are never reused after `close` — the registry only grows, per the
/// fill-factor policy in `RegistryConfig`.
pub struct Registry {
    slots: GrowVec<Option<PoolManager>>,
    len: usize,
}

impl Registry {
    /// Create an empty registry with the default growth policy.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with an explicit growth policy.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slots: GrowVec::new(config.registry),
            len: 0,
        }
    }

    /// Open a pool of `size` bytes backed by `host`, using `pool_config`
    /// for its node heap and gap index growth policies.
    pub fn open(
        &mut self,
        size: usize,
        policy: Policy,
        host: Box<dyn HostAllocator>,
        pool_config: PoolConfig,
    ) -> Result<PoolId, PoolError> {
        self.slots.ensure_capacity(self.len)?;
        let manager = PoolManager::open(size, policy, host, pool_config)?;
        let id = PoolId(self.len as u32);
        self.slots.set(self.len, Some(manager));
        self.len += 1;
        Ok(id)
    }

    /// Open a pool backed by the process heap, with default growth
    /// tunables — the common case.
    pub fn open_default(&mut self, size: usize, policy: Policy) -> Result<PoolId, PoolError> {
        self.open(size, policy, Box::new(SystemHost), PoolConfig::default())
    }

    fn manager(&self, id: PoolId) -> Result<&PoolManager, PoolError> {
        let idx = id.0 as usize;
        if idx >= self.slots.capacity() {
            return Err(PoolError::fail(format!("{id} was never opened")));
        }
        self.slots
            .get(idx)
            .as_ref()
            .ok_or_else(|| PoolError::fail(format!("{id} is closed")))
    }

    fn manager_mut(&mut self, id: PoolId) -> Result<&mut PoolManager, PoolError> {
        let idx = id.0 as usize;
        if idx >= self.slots.capacity() {
            return Err(PoolError::fail(format!("{id} was never opened")));
        }
        self.slots
            .get_mut(idx)
            .as_mut()
            .ok_or_else(|| PoolError::fail(format!("{id} is closed")))
    }

    /// Allocate `size` bytes from the given pool.
    pub fn alloc(&mut self, id: PoolId, size: usize) -> Result<AllocHandle, PoolError> {
        self.manager_mut(id)?.alloc(id, size)
    }

    /// Free a previously-returned allocation.
    pub fn free(&mut self, handle: &AllocHandle) -> Result<(), PoolError> {
        self.manager_mut(handle.pool())?.free(handle)
    }

    /// Snapshot a pool's segment list.
    pub fn inspect(&self, id: PoolId) -> Result<Vec<(usize, bool)>, PoolError> {
        Ok(self.manager(id)?.inspect())
    }

    /// Close a pool, releasing its region.
    ///
    /// Refuses with `NotFreed` (leaving the pool open) if it still has live
    /// allocations or has not coalesced to a single gap. Fails with `Fail`
    /// if `id` was never returned by any `open` call, or `CalledAgain` if
    /// `id` was opened but has already been closed.
    pub fn close(&mut self, id: PoolId) -> Result<(), PoolError> {
        let idx = id.0 as usize;
        if idx >= self.slots.capacity() {
            return Err(PoolError::fail(format!("{id} was never opened")));
        }
        let manager = self.slots.get(idx).as_ref().ok_or(PoolError::CalledAgain)?;
        if manager.num_allocs() != 0 || manager.num_gaps() != 1 {
            return Err(PoolError::NotFreed {
                num_allocs: manager.num_allocs(),
                num_gaps: manager.num_gaps(),
            });
        }
        let mut manager = self
            .slots
            .get_mut(idx)
            .take()
            .expect("checked Some above under the same &mut self");
        manager.close()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_alloc_then_close() {
        let mut reg = Registry::new();
        let id = reg.open_default(100, Policy::FirstFit).unwrap();
        let a = reg.alloc(id, 50).unwrap();
        reg.free(&a).unwrap();
        assert!(reg.close(id).is_ok());
    }

    #[test]
    fn close_with_live_alloc_is_refused_and_pool_stays_usable() {
        let mut reg = Registry::new();
        let id = reg.open_default(100, Policy::FirstFit).unwrap();
        let a = reg.alloc(id, 50).unwrap();
        assert!(matches!(reg.close(id), Err(PoolError::NotFreed { .. })));
        // pool is still open: freeing now and closing again must succeed.
        reg.free(&a).unwrap();
        assert!(reg.close(id).is_ok());
    }

    #[test]
    fn double_close_is_called_again() {
        let mut reg = Registry::new();
        let id = reg.open_default(100, Policy::FirstFit).unwrap();
        reg.close(id).unwrap();
        assert_eq!(reg.close(id), Err(PoolError::CalledAgain));
    }

    #[test]
    fn closed_slot_is_never_reused_by_a_later_open() {
        let mut reg = Registry::new();
        let id1 = reg.open_default(100, Policy::FirstFit).unwrap();
        reg.close(id1).unwrap();
        let id2 = reg.open_default(100, Policy::FirstFit).unwrap();
        assert_ne!(id1, id2);
    }

    #[test]
    fn operations_on_unknown_pool_fail() {
        let mut reg = Registry::new();
        assert!(reg.inspect(PoolId(42)).is_err());
    }

    #[test]
    fn close_on_never_opened_pool_is_a_fail_not_called_again() {
        let mut reg = Registry::new();
        assert!(matches!(reg.close(PoolId(42)), Err(PoolError::Fail { .. })));
    }
}
