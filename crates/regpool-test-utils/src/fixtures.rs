//! Generators for randomized pool sizes, placement policies, and
//! alloc/free operation sequences.

use proptest::prelude::*;
use regpool_core::Policy;

/// One step in a randomized sequence of pool operations.
///
/// The embedded values are raw generator output; callers reduce them
/// modulo a live bound (pool size for `Alloc`, live-allocation count for
/// `Free`) since that bound isn't known until the sequence is replayed
/// against an actual pool.
#[derive(Clone, Copy, Debug)]
pub enum Op {
    /// Request an allocation of some size derived from the payload.
    Alloc(usize),
    /// Free the live allocation at some index derived from the payload.
    Free(usize),
}

/// Either placement policy, with no bias — both are equally likely.
pub fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop_oneof![Just(Policy::FirstFit), Just(Policy::BestFit)]
}

/// A pool size in a range large enough to exercise several splits and
/// coalesces without every operation saturating the pool immediately.
pub fn pool_size_strategy() -> impl Strategy<Value = usize> {
    64usize..8192
}

/// A single operation, biased towards `Alloc` so a sequence doesn't run
/// dry of live allocations to free.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<usize>().prop_map(Op::Alloc),
        1 => any::<usize>().prop_map(Op::Free),
    ]
}

/// A bounded-length sequence of operations.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 0..=max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_strategy_is_nonempty_range() {
        let mut runner = proptest::test_runner::TestRunner::default();
        let value = pool_size_strategy().new_tree(&mut runner).unwrap().current();
        assert!(value >= 64);
    }
}
