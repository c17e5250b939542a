//! Shared test helpers.


/// Reference model of an LRU write-back cache.
pub mod model;
