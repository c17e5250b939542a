//! Simulator: owns the cache engine and the statistics side-by-side.
//!
//! The engine answers hit or miss; the simulator charges the configured cost
//! for that outcome, both to the statistics and to the engine's logical clock,
//! so the next access sees the advanced clock.

use tracing::info;

use crate::cache::{Access, CacheSim};
use crate::common::data::{AccessType, Outcome};
use crate::common::error::{AccessError, ConfigError};
use crate::config::{Config, TimingConfig};
use crate::stats::SimStats;

/// Top-level simulator: cache engine + run statistics.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// Cache engine with its backing memory and clock.
    pub cache: CacheSim,
    /// Statistics accumulated since creation or the last reset.
    pub stats: SimStats,
    timing: TimingConfig,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache geometry or memory settings are invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let cache = CacheSim::from_config(config)?;
        let g = cache.geometry();
        info!(
            words_per_block = g.words_per_block(),
            blocks = g.num_blocks(),
            ways = g.ways(),
            sets = g.num_sets(),
            tag_bits = g.tag_bits(),
            index_bits = g.index_bits(),
            offset_bits = g.offset_bits(),
            memory = cache.memory().len(),
            "simulator created"
        );
        Ok(Self {
            cache,
            stats: SimStats::default(),
            timing: config.timing,
        })
    }

    /// Simulates a `lw` and charges its cost.
    ///
    /// # Errors
    ///
    /// Forwards the engine's [`AccessError`]; a rejected access is not counted.
    pub fn load_word(&mut self, addr: u32) -> Result<Access, AccessError> {
        let access = self.cache.load_word(addr)?;
        self.charge(AccessType::Load, &access);
        Ok(access)
    }

    /// Simulates a `sw` and charges its cost.
    ///
    /// # Errors
    ///
    /// Forwards the engine's [`AccessError`]; a rejected access is not counted.
    pub fn store_word(&mut self, addr: u32, value: u32) -> Result<Access, AccessError> {
        let access = self.cache.store_word(addr, value)?;
        self.charge(AccessType::Store, &access);
        Ok(access)
    }

    fn charge(&mut self, kind: AccessType, access: &Access) {
        let cycles = match access.outcome {
            Outcome::Hit => self.timing.hit_cycles,
            Outcome::Miss => self.timing.miss_cycles,
        };
        self.stats.record(kind, access, cycles);
        self.cache.advance_clock(cycles);
    }

    /// Starts a fresh run: cache, clock, memory image, and statistics.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.stats = SimStats::default();
        info!("simulator reset");
    }

    /// Cycle costs in effect.
    pub const fn timing(&self) -> &TimingConfig {
        &self.timing
    }
}
