//! Set-Associative Write-Back Cache Engine.
//!
//! This module implements a set-associative cache in front of a byte-addressable
//! backing memory. It provides:
//! 1. **Lookup:** Address decoding and an in-order scan of the indexed set.
//! 2. **Allocation:** Filling the first empty way, or evicting the LRU way when the set is full.
//! 3. **Write Policy:** Write-back (dirty victims are flushed on eviction) and
//!    write-allocate (a store miss fetches the whole block before patching it).
//!
//! Loads and stores share one locate-or-allocate routine; they differ only in the
//! action applied to the resident block afterwards.

/// Validated geometry and the tag/index/offset address split.
pub mod geometry;

/// Cache blocks and the flat block store.
pub mod block;

/// LRU victim selection.
pub mod lru;

use tracing::{debug, trace};

pub use self::block::{CacheBlock, CacheStore};
pub use self::geometry::{AddrParts, CacheGeometry};
use crate::common::constants::BYTES_PER_WORD;
use crate::common::data::{AccessType, Outcome};
use crate::common::error::{AccessError, ConfigError};
use crate::config::Config;
use crate::memory::Memory;

/// Block displaced from a full set to make room for a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Start address of the evicted memory block.
    pub block_addr: u32,
    /// Whether the victim was dirty and had to be written back.
    pub written_back: bool,
}

/// Result of a completed word access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Hit or miss.
    pub outcome: Outcome,
    /// Set the address mapped to.
    pub set: usize,
    /// Way that now holds the block.
    pub way: usize,
    /// Word at the address after the access (the loaded or the stored value).
    pub value: u32,
    /// Victim displaced by the miss, if the set was full.
    pub eviction: Option<Eviction>,
}

/// Cache simulator owning its block store, backing memory, and logical clock.
///
/// The clock is the LRU recency metric. The engine only reads it; the driver
/// advances it with [`CacheSim::advance_clock`] after each access.
#[derive(Clone, Debug)]
pub struct CacheSim {
    geometry: CacheGeometry,
    store: CacheStore,
    memory: Memory,
    clock: u64,
}

impl CacheSim {
    /// Creates a cache with every block invalid, in front of `memory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CacheLargerThanMemory`] if the cache data would
    /// exceed the memory size.
    pub fn new(geometry: CacheGeometry, memory: Memory) -> Result<Self, ConfigError> {
        let capacity = geometry
            .num_blocks()
            .checked_mul(geometry.block_bytes())
            .unwrap_or(usize::MAX);
        if capacity > memory.len() {
            return Err(ConfigError::CacheLargerThanMemory {
                capacity,
                memory_size: memory.len(),
            });
        }
        Ok(Self {
            store: CacheStore::new(geometry),
            geometry,
            memory,
            clock: 0,
        })
    }

    /// Builds the cache and memory described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or the memory settings are invalid.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let geometry = config.cache.geometry()?;
        let memory = Memory::from_config(&config.memory)?;
        Self::new(geometry, memory)
    }

    /// Simulates a `lw` at `addr`.
    ///
    /// On a hit only the block's timestamp changes. On a miss the block is
    /// fetched into the first empty way of the set, or into the LRU way after
    /// writing that way back if it is dirty.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] without changing any state if `addr` is not
    /// word aligned or its block is not fully inside memory.
    pub fn load_word(&mut self, addr: u32) -> Result<Access, AccessError> {
        self.access(AccessType::Load, addr, |block, offset| block.read_word(offset))
    }

    /// Simulates a `sw` of `value` at `addr`.
    ///
    /// The block is located or allocated exactly as for a load, then the four
    /// bytes at the address are overwritten big-endian and the block is marked
    /// dirty. Memory is not updated until the block is evicted.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CacheSim::load_word`].
    pub fn store_word(&mut self, addr: u32, value: u32) -> Result<Access, AccessError> {
        self.access(AccessType::Store, addr, |block, offset| {
            block.write_word(offset, value);
            value
        })
    }

    /// Shared locate-or-allocate path; `apply` runs on the resident block.
    fn access<F>(&mut self, kind: AccessType, addr: u32, apply: F) -> Result<Access, AccessError>
    where
        F: FnOnce(&mut CacheBlock, usize) -> u32,
    {
        let parts = self.geometry.decode(addr);
        let block_base = addr - parts.offset as u32;
        let src = self.check(kind, addr, block_base)?;
        let now = self.clock;
        trace!(
            %kind,
            addr = format_args!("{addr:#010x}"),
            tag = format_args!("{:#x}", parts.tag),
            index = parts.index,
            offset = parts.offset,
            "decode"
        );

        let ways = self.store.set_mut(parts.index);

        let mut slot = None;
        for (way, block) in ways.iter_mut().enumerate() {
            if block.matches(parts.tag) {
                block.touch(now);
                trace!(set = parts.index, way, "hit");
                slot = Some((way, Outcome::Hit));
                break;
            }
            if !block.valid() {
                block.fill(parts.tag, &self.memory.as_bytes()[src.clone()], now);
                debug!(
                    set = parts.index,
                    way,
                    block = format_args!("{block_base:#010x}"),
                    "fill empty way"
                );
                slot = Some((way, Outcome::Miss));
                break;
            }
        }

        let (way, outcome, eviction) = match slot {
            Some((way, outcome)) => (way, outcome, None),
            None => {
                let way = lru::select_victim(ways);
                let victim = &mut ways[way];
                let victim_addr = self.geometry.block_address(victim.tag(), parts.index);
                let written_back = victim.dirty();
                if written_back {
                    // The victim was filled from this same in-range block, so the
                    // range check inside `write_slice` always passes here.
                    let _ = self.memory.write_slice(victim_addr, victim.data());
                    victim.clean();
                }
                debug!(
                    set = parts.index,
                    way,
                    victim = format_args!("{victim_addr:#010x}"),
                    written_back,
                    block = format_args!("{block_base:#010x}"),
                    "evict"
                );
                victim.fill(parts.tag, &self.memory.as_bytes()[src], now);
                let eviction = Eviction {
                    block_addr: victim_addr,
                    written_back,
                };
                (way, Outcome::Miss, Some(eviction))
            }
        };

        let value = apply(&mut ways[way], parts.offset);
        Ok(Access {
            outcome,
            set: parts.index,
            way,
            value,
            eviction,
        })
    }

    /// Validates an access and returns the memory range of its block.
    fn check(
        &self,
        kind: AccessType,
        addr: u32,
        block_base: u32,
    ) -> Result<std::ops::Range<usize>, AccessError> {
        if addr as usize % BYTES_PER_WORD != 0 {
            return Err(AccessError::Misaligned { kind, addr });
        }
        let len = self.geometry.block_bytes();
        self.memory
            .range(block_base, len)
            .ok_or(AccessError::OutOfRange {
                kind,
                addr,
                block_base,
                len,
                memory_size: self.memory.len(),
            })
    }

    /// Advances the logical clock by `cycles`.
    pub const fn advance_clock(&mut self, cycles: u64) {
        self.clock = self.clock.saturating_add(cycles);
    }

    /// Current logical clock value.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Invalidates every block, zeroes the clock, and restores memory to its image.
    ///
    /// Dirty data is discarded, not written back.
    pub fn reset(&mut self) {
        self.store.reset();
        self.memory.restore();
        self.clock = 0;
    }

    /// Returns `true` if the block containing `addr` is resident.
    pub fn contains(&self, addr: u32) -> bool {
        let parts = self.geometry.decode(addr);
        self.store.set(parts.index).iter().any(|b| b.matches(parts.tag))
    }

    /// Reads the current value of the word at `addr` without simulating an access.
    ///
    /// Returns the cached copy if the block is resident (it may be dirty), the
    /// memory copy otherwise, and `None` for misaligned or unbacked addresses.
    pub fn peek_word(&self, addr: u32) -> Option<u32> {
        if addr as usize % BYTES_PER_WORD != 0 {
            return None;
        }
        let parts = self.geometry.decode(addr);
        self.store
            .set(parts.index)
            .iter()
            .find(|b| b.matches(parts.tag))
            .map_or_else(
                || self.memory.read_word(addr),
                |b| Some(b.read_word(parts.offset)),
            )
    }

    /// Cache geometry.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// All blocks in set-major order.
    pub fn blocks(&self) -> &[CacheBlock] {
        self.store.blocks()
    }

    /// Block at `way` of set `set`.
    pub fn block(&self, set: usize, way: usize) -> Option<&CacheBlock> {
        self.store.set(set).get(way)
    }

    /// Backing memory (may be stale wherever a dirty block is resident).
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }
}
