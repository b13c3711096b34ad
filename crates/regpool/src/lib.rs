//! Regpool: a fixed-base, variable-sized memory-pool allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! `regpool-core` and `regpool-pool`. For most users, adding `regpool` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use regpool::prelude::*;
//!
//! let mut registry = Registry::new();
//! let pool = registry.open_default(4096, Policy::FirstFit).unwrap();
//! let a = registry.alloc(pool, 256).unwrap();
//! let b = registry.alloc(pool, 512).unwrap();
//! registry.free(&a).unwrap();
//! assert_eq!(registry.inspect(pool).unwrap(), vec![(256, false), (512, true)]);
//! registry.free(&b).unwrap();
//! registry.close(pool).unwrap();
//! ```
//!
//! Callers who don't want to thread a `Registry` through their own state can
//! use the process-wide singleton in [`global`] instead, mirroring the
//! `init`/`shutdown`/`open`/`close`/`alloc`/`free`/`inspect` free-function
//! surface.
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `regpool-core` | IDs, errors, growth policy, host allocator trait |
//! | [`pool`] | `regpool-pool` | Node heap, segment list, gap index, pool manager, registry |
//! | [`global`] | — | Process-wide singleton facade over a single [`pool::Registry`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod global;

/// Identifiers, errors, growth policy, and the host allocator trait
/// (`regpool-core`).
pub use regpool_core as core;

/// Node heap, segment list, gap index, pool manager, and registry
/// (`regpool-pool`).
pub use regpool_pool as pool;

/// Common imports for typical regpool usage.
///
/// ```rust
/// use regpool::prelude::*;
/// ```
pub mod prelude {
    pub use regpool_core::{GrowthPolicy, HostAllocator, NodeIdx, PoolError, PoolId, Policy, SystemHost};
    pub use regpool_pool::{AllocHandle, PoolConfig, Registry, RegistryConfig};
}
