//! Set-associative cache simulator library.
//!
//! This crate models a write-back, write-allocate, LRU set-associative cache in
//! front of a byte-addressable main memory:
//! 1. **Cache:** Address decoding, block store, LRU victim selection, and the load/store engine.
//! 2. **Memory:** Flat backing memory seeded from an image.
//! 3. **Simulation:** Driver that charges hit/miss costs, the command language, and dumps.
//! 4. **Configuration & statistics:** JSON-deserializable settings and run counters.

/// Cache engine (geometry, blocks, LRU, load/store).
pub mod cache;
/// Common types and constants (access types, outcomes, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Backing memory.
pub mod memory;
/// Driver, command language, script runner, and dumps.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Cache engine; construct with `CacheSim::new` or `CacheSim::from_config`.
pub use crate::cache::CacheSim;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Driver owning the engine and statistics.
pub use crate::sim::Simulator;
