//! Process-wide singleton facade over a single [`Registry`].
//!
//! Mirrors the free-function surface from the external interfaces: `init`,
//! `shutdown`, `open`, `close`, `alloc`, `free`, `inspect`. The backing
//! [`Registry`] lives behind `std::sync::OnceLock<Mutex<Option<Registry>>>`
//! purely so this module compiles as safe Rust — the mutex grants no
//! concurrency guarantees beyond preventing undefined behavior; callers
//! still serialize their own access to a given pool.

use std::sync::{Mutex, OnceLock};

use regpool_core::{HostAllocator, PoolError, PoolId, Policy};
use regpool_pool::{AllocHandle, PoolConfig, Registry};

static REGISTRY: OnceLock<Mutex<Option<Registry>>> = OnceLock::new();

fn cell() -> &'static Mutex<Option<Registry>> {
    REGISTRY.get_or_init(|| Mutex::new(None))
}

/// Initialize the process-wide registry.
///
/// Fails with `CalledAgain` if already initialized.
pub fn init() -> Result<(), PoolError> {
    let mut guard = cell().lock().unwrap();
    if guard.is_some() {
        return Err(PoolError::CalledAgain);
    }
    *guard = Some(Registry::new());
    Ok(())
}

/// Tear down the process-wide registry.
///
/// Fails with `CalledAgain` if not initialized. Callers must close every
/// open pool first; `shutdown` does not do it for them.
pub fn shutdown() -> Result<(), PoolError> {
    let mut guard = cell().lock().unwrap();
    if guard.is_none() {
        return Err(PoolError::CalledAgain);
    }
    *guard = None;
    Ok(())
}

fn with_registry<T>(f: impl FnOnce(&mut Registry) -> Result<T, PoolError>) -> Result<T, PoolError> {
    let mut guard = cell().lock().unwrap();
    let registry = guard
        .as_mut()
        .ok_or_else(|| PoolError::fail("global registry not initialized; call init() first"))?;
    f(registry)
}

/// Open a pool backed by the process heap with default growth tunables.
pub fn open(size: usize, policy: Policy) -> Result<PoolId, PoolError> {
    with_registry(|r| r.open_default(size, policy))
}

/// Open a pool backed by a caller-supplied host allocator and growth
/// tunables.
pub fn open_with_host(
    size: usize,
    policy: Policy,
    host: Box<dyn HostAllocator>,
    config: PoolConfig,
) -> Result<PoolId, PoolError> {
    with_registry(|r| r.open(size, policy, host, config))
}

/// Close a pool, releasing its region.
pub fn close(pool: PoolId) -> Result<(), PoolError> {
    with_registry(|r| r.close(pool))
}

/// Allocate `size` bytes from `pool`.
pub fn alloc(pool: PoolId, size: usize) -> Result<AllocHandle, PoolError> {
    with_registry(|r| r.alloc(pool, size))
}

/// Free a previously-returned allocation.
pub fn free(handle: &AllocHandle) -> Result<(), PoolError> {
    with_registry(|r| r.free(handle))
}

/// Snapshot a pool's segment list.
pub fn inspect(pool: PoolId) -> Result<Vec<(usize, bool)>, PoolError> {
    with_registry(|r| r.inspect(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global registry is one process-wide static, so every assertion
    // about its lifecycle has to live in a single test function — splitting
    // across tests would race under the default parallel test runner.
    #[test]
    fn global_lifecycle_end_to_end() {
        assert_eq!(open(10, Policy::FirstFit), Err(PoolError::fail(
            "global registry not initialized; call init() first"
        )));

        init().unwrap();
        assert_eq!(init(), Err(PoolError::CalledAgain));

        let pool = open(1024, Policy::FirstFit).unwrap();
        let a = alloc(pool, 100).unwrap();
        assert_eq!(inspect(pool).unwrap(), vec![(100, true), (924, false)]);
        free(&a).unwrap();
        close(pool).unwrap();

        shutdown().unwrap();
        assert_eq!(shutdown(), Err(PoolError::CalledAgain));
    }
}
