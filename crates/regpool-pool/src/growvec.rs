//! Growable, fixed-record backing storage with fill-factor growth.
//!
//! [`GrowVec`] is the single "dynamic vector" building block reused by the
//! pool registry, a pool's node heap, and a pool's gap index. It owns a
//! `Vec<T>` pre-filled to its logical capacity with `T::default()`
//! placeholders; callers index into it directly and call
//! [`GrowVec::ensure_capacity`] before adding a new logical element.
//! Growth never shrinks and never moves an existing element to a different
//! index — `Vec::resize_with` only appends past the current length.

use regpool_core::{GrowthPolicy, PoolError};

/// A growable array of `T` with explicit fill-factor growth, per
/// [`GrowthPolicy`].
#[derive(Clone, Debug)]
pub struct GrowVec<T> {
    buf: Vec<T>,
    policy: GrowthPolicy,
}

impl<T: Default> GrowVec<T> {
    /// Create a vector pre-filled to `policy.initial_capacity`.
    pub fn new(policy: GrowthPolicy) -> Self {
        let mut buf = Vec::with_capacity(policy.initial_capacity);
        buf.resize_with(policy.initial_capacity, T::default);
        Self { buf, policy }
    }

    /// Current capacity (number of slots backing this vector).
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Grow the backing storage if `logical_len` has reached the fill
    /// factor relative to the current capacity.
    ///
    /// `logical_len` is the caller's notion of how many slots are in use —
    /// for a compact vector (gap index, registry) that's its length; for a
    /// sparsely-used vector (node heap) it's the used-slot count.
    pub fn ensure_capacity(&mut self, logical_len: usize) -> Result<(), PoolError> {
        if self.policy.must_grow(logical_len, self.capacity()) {
            let new_cap = self.policy.next_capacity(self.capacity());
            let additional = new_cap - self.buf.len();
            self.buf
                .try_reserve_exact(additional)
                .map_err(|e| PoolError::fail(format!("dynamic vector growth failed: {e}")))?;
            self.buf.resize_with(new_cap, T::default);
        }
        Ok(())
    }

    /// Borrow the slot at `idx`.
    pub fn get(&self, idx: usize) -> &T {
        &self.buf[idx]
    }

    /// Mutably borrow the slot at `idx`.
    pub fn get_mut(&mut self, idx: usize) -> &mut T {
        &mut self.buf[idx]
    }

    /// Overwrite the slot at `idx`.
    pub fn set(&mut self, idx: usize, value: T) {
        self.buf[idx] = value;
    }

    /// View the full backing storage, including unused tail slots.
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prefills_to_initial_capacity() {
        let v: GrowVec<u32> = GrowVec::new(GrowthPolicy::new(8, 0.75, 2));
        assert_eq!(v.capacity(), 8);
        assert_eq!(*v.get(7), 0);
    }

    #[test]
    fn ensure_capacity_grows_past_fill_factor() {
        let mut v: GrowVec<u32> = GrowVec::new(GrowthPolicy::new(4, 0.75, 2));
        v.ensure_capacity(3).unwrap();
        assert_eq!(v.capacity(), 4, "3/4 == fill factor exactly, no growth yet");
        v.ensure_capacity(4).unwrap();
        assert_eq!(v.capacity(), 8, "4/4 exceeds fill factor, must grow");
    }

    #[test]
    fn capacity_never_shrinks_across_repeated_growth() {
        let mut v: GrowVec<u32> = GrowVec::new(GrowthPolicy::new(2, 0.75, 2));
        let mut last = v.capacity();
        for n in 0..50 {
            v.ensure_capacity(n).unwrap();
            assert!(v.capacity() >= last);
            last = v.capacity();
        }
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut v: GrowVec<u32> = GrowVec::new(GrowthPolicy::new(4, 0.75, 2));
        v.set(2, 42);
        assert_eq!(*v.get(2), 42);
    }
}
