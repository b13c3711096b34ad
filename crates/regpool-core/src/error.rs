//! Error types for the regpool region allocator.

use std::error::Error;
use std::fmt;

/// Errors returned by pool and registry operations.
///
/// There is deliberately no `Ok` variant here — success is the `Ok` side of
/// the `Result` these errors are carried in. `NotFound` is listed separately
/// from `Fail` because it is a routine outcome (no gap was large enough),
/// not a bookkeeping failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// A generic failure: a bad handle, an unreachable invariant, or an
    /// internal bookkeeping error (including a failed growth of a dynamic
    /// vector).
    Fail {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// No free segment large enough for the requested allocation size was
    /// found. Routine, not a bug.
    NotFound,
    /// `close` was refused because the pool still has live allocations, or
    /// its free space has not coalesced down to a single gap.
    NotFreed {
        /// Number of allocations still live on the pool.
        num_allocs: usize,
        /// Number of free segments currently tracked.
        num_gaps: usize,
    },
    /// A lifecycle operation was invoked out of sequence (double `init`,
    /// `shutdown` before `init`, or a repeated `close` of an already-closed
    /// pool).
    CalledAgain,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail { reason } => write!(f, "pool operation failed: {reason}"),
            Self::NotFound => write!(f, "no gap large enough for the requested allocation"),
            Self::NotFreed {
                num_allocs,
                num_gaps,
            } => {
                write!(
                    f,
                    "pool not freed: {num_allocs} live allocation(s), {num_gaps} gap(s) (expected 0 and 1)"
                )
            }
            Self::CalledAgain => write!(f, "lifecycle operation called out of sequence"),
        }
    }
}

impl Error for PoolError {}

impl PoolError {
    /// Build a [`PoolError::Fail`] from a display-able reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_freed_display_mentions_counts() {
        let err = PoolError::NotFreed {
            num_allocs: 2,
            num_gaps: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('2'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn fail_helper_wraps_reason() {
        let err = PoolError::fail("node heap growth failed");
        assert!(matches!(err, PoolError::Fail { .. }));
        assert!(err.to_string().contains("node heap growth failed"));
    }
}
