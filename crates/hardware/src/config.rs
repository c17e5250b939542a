//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline geometry, memory size and image, and access costs.
//! 2. **Structures:** Hierarchical config for the cache, backing memory, and timing.
//! 3. **Validation:** Conversion of the raw cache settings into a checked [`CacheGeometry`].
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with `Config::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::cache::CacheGeometry;
use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
///
/// These values reproduce the classroom setup the simulator was written for
/// when not explicitly overridden.
mod defaults {
    /// Default words per cache block (16-byte blocks).
    pub const WORDS_PER_BLOCK: usize = 4;

    /// Default total number of cache blocks.
    pub const BLOCKS: usize = 16;

    /// Default associativity (2-way set-associative).
    pub const WAYS: usize = 2;

    /// Default backing memory size (8 KiB).
    pub const MEMORY_SIZE: usize = 8 << 10;

    /// Cycles charged for a cache hit.
    pub const HIT_CYCLES: u64 = 1;

    /// Cycles charged for a cache miss.
    pub const MISS_CYCLES: u64 = 100;

    /// Initial contents of the low end of memory; the rest is zero.
    pub const MEMORY_IMAGE: [u8; 80] = [
        0xde, 0xad, 0xbe, 0xef, 0xba, 0xda, 0xca, 0xfe, //
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, //
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, //
        0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, //
        b'h', b'e', b'l', b'l', b'o', b' ', b'w', b'o', //
        b'r', b'l', b'd', b'!', 0x89, 0xab, 0xcd, 0xef, //
        0x50, 0x52, 0x54, 0x56, 0x58, 0x5a, 0x5c, 0x5e, //
        0x60, 0x62, 0x64, 0x66, 0x68, 0x6a, 0x6c, 0x6e, //
        0x70, 0x72, 0x74, 0x76, 0x78, 0x7a, 0x7c, 0x7e, //
        0x80, 0x82, 0x84, 0x86, 0x88, 0x8a, 0x8c, 0x8e, //
    ];
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.words_per_block, 4);
/// assert_eq!(config.cache.blocks, 16);
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.timing.miss_cycles, 100);
/// ```
///
/// Deserializing from JSON; omitted sections and fields fall back to defaults:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "words_per_block": 8, "blocks": 8, "ways": 4 },
///     "memory": { "size_bytes": 4096, "image": [1, 2, 3, 4] }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// let geometry = config.cache.geometry().unwrap();
/// assert_eq!(geometry.num_sets(), 2);
/// assert_eq!(geometry.block_bytes(), 32);
/// assert_eq!(config.memory.image, vec![1, 2, 3, 4]);
/// assert_eq!(config.timing.hit_cycles, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache geometry
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing memory size and initial contents
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Per-access cycle costs charged by the driver
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Json`] if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Raw cache geometry as supplied by the user.
///
/// Nothing is checked until [`CacheConfig::geometry`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Words (4 bytes each) per cache block
    #[serde(default = "CacheConfig::default_words_per_block")]
    pub words_per_block: usize,

    /// Total number of cache blocks
    #[serde(default = "CacheConfig::default_blocks")]
    pub blocks: usize,

    /// Number of ways per set; 1 is direct-mapped, `blocks` is fully associative
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
}

impl CacheConfig {
    /// Creates a cache configuration from explicit values.
    pub const fn new(words_per_block: usize, blocks: usize, ways: usize) -> Self {
        Self {
            words_per_block,
            blocks,
            ways,
        }
    }

    /// Validates the settings and derives the address split.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any value is zero, the block count is not a
    /// multiple of the associativity, the block size or set count is not a power
    /// of two, or the offset and index fields do not fit in a 32-bit address.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.words_per_block, self.blocks, self.ways)
    }

    fn default_words_per_block() -> usize {
        defaults::WORDS_PER_BLOCK
    }

    fn default_blocks() -> usize {
        defaults::BLOCKS
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(defaults::WORDS_PER_BLOCK, defaults::BLOCKS, defaults::WAYS)
    }
}

/// Backing memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// Bytes copied to address 0 when the memory is created or reset
    #[serde(default = "MemoryConfig::default_image")]
    pub image: Vec<u8>,
}

impl MemoryConfig {
    /// Returns the default memory size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default memory image.
    fn default_image() -> Vec<u8> {
        defaults::MEMORY_IMAGE.to_vec()
    }
}

impl Default for MemoryConfig {
    /// 8 KiB of memory seeded with the default image.
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            image: defaults::MEMORY_IMAGE.to_vec(),
        }
    }
}

/// Cycle costs the driver charges per access.
///
/// The same amounts advance the engine's logical clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Cycles charged for a hit
    #[serde(default = "TimingConfig::default_hit")]
    pub hit_cycles: u64,

    /// Cycles charged for a miss
    #[serde(default = "TimingConfig::default_miss")]
    pub miss_cycles: u64,
}

impl TimingConfig {
    fn default_hit() -> u64 {
        defaults::HIT_CYCLES
    }

    fn default_miss() -> u64 {
        defaults::MISS_CYCLES
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hit_cycles: defaults::HIT_CYCLES,
            miss_cycles: defaults::MISS_CYCLES,
        }
    }
}
