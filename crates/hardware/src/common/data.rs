//! Memory Access Types.
//!
//! This module defines the classification of accesses presented to the cache engine.
//! These types are used for the following:
//! 1. **Engine Dispatch:** Selecting the on-hit/on-fill action of the shared lookup routine.
//! 2. **Statistics Tracking:** Counting loads and stores separately.
//! 3. **Diagnostics:** Labelling trace output and access errors.

use std::fmt;

/// Type of word access issued to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Word load (`lw`).
    ///
    /// Reads four bytes from the containing block; never marks the block dirty.
    Load,

    /// Word store (`sw`).
    ///
    /// Patches four bytes in the containing block and marks it dirty
    /// (write-back, write-allocate).
    Store,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Store => write!(f, "store"),
        }
    }
}

/// Outcome of a single cache access.
///
/// Hits and misses are ordinary results, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The containing block was resident in the indexed set.
    Hit,
    /// The containing block had to be brought in from backing memory.
    Miss,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}
