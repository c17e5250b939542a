//! Cache Geometry and Address Decoding.
//!
//! A validated cache shape and the pure mapping from a 32-bit address to its
//! `(tag, index, offset)` fields:
//!
//! ```text
//!  31                                                     0
//! +-----------------------+----------------+--------------+
//! |          tag          |     index      |    offset    |
//! +-----------------------+----------------+--------------+
//!         tag_bits           index_bits       offset_bits
//! ```
//!
//! Block size and set count are powers of two, so the split is a pair of
//! shifts and masks and is equivalent to
//! `offset = a % block_bytes`, `index = (a / block_bytes) % sets`,
//! `tag = a / (block_bytes * sets)`.

use std::ops::Range;

use crate::common::constants::{ADDRESS_BITS, BYTES_PER_WORD};
use crate::common::error::ConfigError;

/// Fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddrParts {
    /// High-order bits identifying the memory block within its set.
    pub tag: u32,
    /// Set the block maps to.
    pub index: usize,
    /// Byte offset inside the block.
    pub offset: usize,
}

/// Validated cache shape with the derived address split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    words_per_block: usize,
    num_blocks: usize,
    ways: usize,
    num_sets: usize,
    offset_bits: u32,
    index_bits: u32,
}

impl CacheGeometry {
    /// Validates a cache shape.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Zero`] if any argument is zero.
    /// * [`ConfigError::UnevenSets`] if `num_blocks` is not a multiple of `ways`.
    /// * [`ConfigError::BlockSizeNotPowerOfTwo`] / [`ConfigError::SetCountNotPowerOfTwo`]
    ///   if the shift-based split would be ill-defined.
    /// * [`ConfigError::AddressTooNarrow`] if offset and index need more than 32 bits.
    pub fn new(words_per_block: usize, num_blocks: usize, ways: usize) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("words per block", words_per_block),
            ("number of blocks", num_blocks),
            ("number of ways", ways),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        if num_blocks % ways != 0 {
            return Err(ConfigError::UnevenSets {
                blocks: num_blocks,
                ways,
            });
        }
        if !words_per_block.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(words_per_block));
        }
        let num_sets = num_blocks / ways;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo {
                sets: num_sets,
                blocks: num_blocks,
                ways,
            });
        }

        // Sum of exponents; the byte count itself may not fit in usize.
        let offset_bits = words_per_block.trailing_zeros() + BYTES_PER_WORD.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressTooNarrow {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            words_per_block,
            num_blocks,
            ways,
            num_sets,
            offset_bits,
            index_bits,
        })
    }

    /// Words per block.
    #[inline]
    pub const fn words_per_block(&self) -> usize {
        self.words_per_block
    }

    /// Total number of blocks in the cache.
    #[inline]
    pub const fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Ways per set (associativity).
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_bytes(&self) -> usize {
        self.words_per_block * BYTES_PER_WORD
    }

    /// Width of the offset field.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.offset_bits - self.index_bits
    }

    /// Splits `addr` into tag, set index, and block offset.
    #[inline]
    pub const fn decode(&self, addr: u32) -> AddrParts {
        let addr = addr as u64;
        let offset = addr & ((1u64 << self.offset_bits) - 1);
        let index = (addr >> self.offset_bits) & ((1u64 << self.index_bits) - 1);
        let tag = addr >> (self.offset_bits + self.index_bits);
        AddrParts {
            tag: tag as u32,
            index: index as usize,
            offset: offset as usize,
        }
    }

    /// Start address of the block holding `tag` in set `index`.
    ///
    /// Inverse of [`CacheGeometry::decode`] with a zero offset.
    #[inline]
    pub const fn block_address(&self, tag: u32, index: usize) -> u32 {
        let tag_part = (tag as u64) << (self.offset_bits + self.index_bits);
        let index_part = (index as u64) << self.offset_bits;
        (tag_part | index_part) as u32
    }

    /// Positions of set `index`'s ways in the flat block array.
    #[inline]
    pub const fn set_range(&self, index: usize) -> Range<usize> {
        let base = index * self.ways;
        base..base + self.ways
    }
}
