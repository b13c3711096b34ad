//! Fill-factor growth policy shared by every dynamic vector in regpool.

/// Controls when and by how much a dynamic vector grows.
///
/// Every dynamic vector in this crate family (the pool registry, a pool's
/// node heap, a pool's gap index) grows the same way: once its length
/// exceeds `fill_factor` of its capacity, capacity is multiplied by
/// `expand_factor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPolicy {
    /// Capacity reserved at construction.
    pub initial_capacity: usize,
    /// Load threshold (0.0..=1.0) past which the vector grows before the
    /// next insertion.
    pub fill_factor: f64,
    /// Multiplier applied to capacity on growth.
    pub expand_factor: usize,
}

impl GrowthPolicy {
    /// Construct a growth policy, clamping `fill_factor` into `(0.0, 1.0]`
    /// and requiring `expand_factor >= 2` so growth always makes progress.
    pub fn new(initial_capacity: usize, fill_factor: f64, expand_factor: usize) -> Self {
        Self {
            initial_capacity: initial_capacity.max(1),
            fill_factor: fill_factor.clamp(f64::EPSILON, 1.0),
            expand_factor: expand_factor.max(2),
        }
    }

    /// Whether a vector with `len` elements and `capacity` slots must grow
    /// before accepting one more insertion.
    pub fn must_grow(&self, len: usize, capacity: usize) -> bool {
        (len as f64) / (capacity as f64) > self.fill_factor
    }

    /// The next capacity to grow to, starting from `capacity`.
    ///
    /// Guarantees the result is strictly greater than `capacity` (assuming
    /// `capacity >= 1`), so repeated growth always terminates.
    pub fn next_capacity(&self, capacity: usize) -> usize {
        capacity.saturating_mul(self.expand_factor).max(capacity + 1)
    }

    /// The registry's default growth policy: initial capacity 20, fill
    /// factor 0.75, expand factor 2.
    pub const fn registry_default() -> Self {
        Self {
            initial_capacity: 20,
            fill_factor: 0.75,
            expand_factor: 2,
        }
    }

    /// The node heap's default growth policy: initial capacity 40, fill
    /// factor 0.75, expand factor 2.
    pub const fn node_heap_default() -> Self {
        Self {
            initial_capacity: 40,
            fill_factor: 0.75,
            expand_factor: 2,
        }
    }

    /// The gap index's default growth policy: initial capacity 40, fill
    /// factor 0.75, expand factor 2.
    pub const fn gap_index_default() -> Self {
        Self {
            initial_capacity: 40,
            fill_factor: 0.75,
            expand_factor: 2,
        }
    }
}


#[cfg(all(test, not(miri)))]
mod proptests {
    use proptest::prelude::*;

    use super::GrowthPolicy;

    proptest! {
        /// Capacity never shrinks and growth always makes progress, for
        /// any valid policy and any starting capacity.
        #[test]
        fn next_capacity_never_shrinks_or_stalls(
            initial_capacity in 1usize..64,
            fill_factor in 0.01f64..1.0,
            expand_factor in 2usize..8,
            capacity in 1usize..10_000,
        ) {
            let policy = GrowthPolicy::new(initial_capacity, fill_factor, expand_factor);
            prop_assert!(policy.next_capacity(capacity) > capacity);
        }

        /// `must_grow` agrees with a direct recomputation of the ratio.
        #[test]
        fn must_grow_matches_ratio(
            fill_factor in 0.01f64..1.0,
            len in 0usize..10_000,
            capacity in 1usize..10_000,
        ) {
            let policy = GrowthPolicy::new(1, fill_factor, 2);
            let expected = (len as f64) / (capacity as f64) > fill_factor;
            prop_assert_eq!(policy.must_grow(len, capacity), expected);
        }
    }
}
