//! Least Recently Used (LRU) Victim Selection.
//!
//! Every block records the logical clock value of its last access, so the LRU
//! way of a full set is simply the one with the smallest timestamp. When several
//! ways share the smallest timestamp the lowest way index is chosen, which keeps
//! replacement deterministic for reference traces.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per eviction, where W is the associativity
//! - **Space Complexity:** no state beyond the per-block timestamp
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Cyclic scans one block larger than the set (thrashing)

use crate::cache::block::CacheBlock;

/// Returns the way to evict from a full set.
///
/// `ways` must be non-empty; an empty slice yields way 0.
pub fn select_victim(ways: &[CacheBlock]) -> usize {
    ways.iter()
        .enumerate()
        .min_by_key(|(_, block)| block.timestamp())
        .map_or(0, |(way, _)| way)
}
