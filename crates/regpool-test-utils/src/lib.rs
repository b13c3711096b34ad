//! Shared `proptest` strategies for the regpool test suites.
//!
//! Lives one level below `regpool-pool` so both it and any future crate can
//! reuse the same randomized-operation generators without creating a
//! dependency cycle back onto the pool implementation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{op_sequence_strategy, op_strategy, policy_strategy, pool_size_strategy, Op};
