//! Fixed-base, variable-sized memory-pool allocator.
//!
//! This crate implements the allocation state machine from the
//! specification: a pool manager owning a node heap (stable-identity
//! segment storage), an address-ordered segment list threaded through the
//! node heap, and a size-ordered gap index used for best-fit placement.
//! [`Registry`] is the explicit, freely-instantiable table of open pools;
//! the `regpool` facade crate layers a process-wide singleton over it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod gap_index;
pub mod growvec;
pub mod handle;
pub mod manager;
pub mod node_heap;
pub mod registry;
pub mod segment;

pub use config::{PoolConfig, RegistryConfig};
pub use gap_index::{GapEntry, GapIndex};
pub use growvec::GrowVec;
pub use handle::AllocHandle;
pub use manager::PoolManager;
pub use node_heap::NodeHeap;
pub use registry::Registry;
pub use segment::Segment;
