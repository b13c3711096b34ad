//! Placement policy for selecting a gap to satisfy an allocation.

use std::fmt;

/// How a pool manager selects a free segment to satisfy an `alloc` request.
///
/// There is no default: every pool must pick one explicitly at `open` time,
/// since the two policies produce different, equally valid layouts and
/// silently defaulting would hide that choice from callers who care about
/// fragmentation behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Use the first free segment large enough, scanning in address order.
    FirstFit,
    /// Use the smallest free segment large enough, breaking ties by the
    /// lowest address.
    BestFit,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstFit => write!(f, "first-fit"),
            Self::BestFit => write!(f, "best-fit"),
        }
    }
}
