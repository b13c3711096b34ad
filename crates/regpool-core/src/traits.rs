//! The host allocator abstraction: how a pool acquires its backing bytes.

use crate::error::PoolError;

/// Provides the raw byte buffers a pool manager carves its segments out of.
///
/// The region allocator never reads or writes the bytes inside a region —
/// it only tracks their layout — so this trait's job is strictly acquiring,
/// growing, and releasing storage. Implementations may back a region with
/// the process heap (the default, [`SystemHost`](crate::host::SystemHost)),
/// a memory-mapped file, a shared-memory segment, or an arena borrowed from
/// elsewhere.
pub trait HostAllocator {
    /// Acquire a zero-initialized byte buffer of exactly `size` bytes.
    fn allocate_bytes(&self, size: usize) -> Result<Box<[u8]>, PoolError>;

    /// Release a buffer previously returned by `allocate_bytes` or
    /// `resize_bytes`.
    fn free_bytes(&self, buf: Box<[u8]>);

    /// Grow or shrink `buf` to `new_size` bytes, preserving the existing
    /// content up to `min(old_size, new_size)` and zero-filling any newly
    /// added bytes.
    ///
    /// The default implementation allocates a fresh buffer and copies,
    /// which is correct for any host but not necessarily optimal; hosts
    /// with a true realloc primitive should override it.
    fn resize_bytes(&self, buf: Box<[u8]>, new_size: usize) -> Result<Box<[u8]>, PoolError> {
        let mut new_buf = self.allocate_bytes(new_size)?;
        let copy_len = buf.len().min(new_size);
        new_buf[..copy_len].copy_from_slice(&buf[..copy_len]);
        self.free_bytes(buf);
        Ok(new_buf)
    }
}
