//! Cache Blocks and the Block Store.
//!
//! A [`CacheBlock`] is one way of one set: valid and dirty bits, a tag, the clock
//! value of its last access, and exactly `block_bytes` of data. The
//! [`CacheStore`] owns every block of the cache as one flat array where set `s`
//! occupies positions `[s * ways, (s + 1) * ways)`.
//!
//! Blocks are created once and reused for the lifetime of the store; they never
//! move between sets.

use crate::cache::geometry::CacheGeometry;

/// One way of a cache set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheBlock {
    valid: bool,
    dirty: bool,
    tag: u32,
    timestamp: u64,
    data: Box<[u8]>,
}

impl CacheBlock {
    /// Creates an invalid, clean, zero-filled block of `block_bytes` bytes.
    pub fn new(block_bytes: usize) -> Self {
        Self {
            valid: false,
            dirty: false,
            tag: 0,
            timestamp: 0,
            data: vec![0; block_bytes].into_boxed_slice(),
        }
    }

    /// Whether the block holds a memory block.
    #[inline]
    pub const fn valid(&self) -> bool {
        self.valid
    }

    /// Whether the block holds writes not yet in memory.
    #[inline]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Tag of the resident memory block.
    #[inline]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Clock value of the last access.
    #[inline]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Block contents.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether this block is valid and holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs a memory block: copies `bytes`, sets the tag, and marks the
    /// block valid and clean as of `now`.
    pub(crate) fn fill(&mut self, tag: u32, bytes: &[u8], now: u64) {
        self.data.copy_from_slice(bytes);
        self.tag = tag;
        self.valid = true;
        self.dirty = false;
        self.timestamp = now;
    }

    /// Records an access at `now`.
    #[inline]
    pub(crate) const fn touch(&mut self, now: u64) {
        self.timestamp = now;
    }

    /// Clears the dirty bit after a write-back.
    #[inline]
    pub(crate) const fn clean(&mut self) {
        self.dirty = false;
    }

    /// Reads the big-endian word at `offset`.
    pub(crate) fn read_word(&self, offset: usize) -> u32 {
        let b = &self.data[offset..offset + 4];
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Writes `value` big-endian at `offset` and marks the block dirty.
    pub(crate) fn write_word(&mut self, offset: usize, value: u32) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        self.dirty = true;
    }

    fn reset(&mut self) {
        self.valid = false;
        self.dirty = false;
        self.tag = 0;
        self.timestamp = 0;
        self.data.fill(0);
    }
}

/// All blocks of the cache, grouped into sets.
#[derive(Clone, Debug)]
pub struct CacheStore {
    blocks: Vec<CacheBlock>,
    geometry: CacheGeometry,
}

impl CacheStore {
    /// Allocates `geometry.num_blocks()` blocks in the initial state.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            blocks: vec![CacheBlock::new(geometry.block_bytes()); geometry.num_blocks()],
            geometry,
        }
    }

    /// Returns every block to the initial state.
    pub fn reset(&mut self) {
        self.blocks.iter_mut().for_each(CacheBlock::reset);
    }

    /// All blocks in set-major order.
    pub fn blocks(&self) -> &[CacheBlock] {
        &self.blocks
    }

    /// The ways of set `index`.
    pub fn set(&self, index: usize) -> &[CacheBlock] {
        &self.blocks[self.geometry.set_range(index)]
    }

    /// The ways of set `index`, mutably.
    pub(crate) fn set_mut(&mut self, index: usize) -> &mut [CacheBlock] {
        &mut self.blocks[self.geometry.set_range(index)]
    }
}
