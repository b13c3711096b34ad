//! The default [`HostAllocator`]: the process heap via `Vec<u8>`.

use crate::error::PoolError;
use crate::traits::HostAllocator;

/// Backs pool regions with ordinary process-heap allocations.
///
/// This is the default host for callers who have no special memory-provider
/// requirements. It never fails `allocate_bytes` except on true OOM (which
/// Rust's global allocator reports by aborting, not by returning an error —
/// callers needing a fallible host for untrusted sizes should supply their
/// own `HostAllocator`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost;

impl HostAllocator for SystemHost {
    fn allocate_bytes(&self, size: usize) -> Result<Box<[u8]>, PoolError> {
        Ok(vec![0u8; size].into_boxed_slice())
    }

    fn free_bytes(&self, buf: Box<[u8]>) {
        drop(buf);
    }

    fn resize_bytes(&self, buf: Box<[u8]>, new_size: usize) -> Result<Box<[u8]>, PoolError> {
        let mut v = buf.into_vec();
        v.resize(new_size, 0);
        Ok(v.into_boxed_slice())
    }
}
