//! Global Simulator Constants.
//!
//! This module defines constants shared by the cache engine, the backing memory,
//! and the command driver. It includes:
//! 1. **Word Constants:** Machine word width and alignment.
//! 2. **Geometry Limits:** Address width used by the tag/index/offset split.
//! 3. **Dump Constants:** Window and row sizes for memory dumps.

/// Number of bytes in a machine word (32-bit machine).
pub const BYTES_PER_WORD: usize = 4;

/// Mask that clears the low bits of a byte address to align it to a word.
pub const WORD_ALIGN_MASK: u32 = !(BYTES_PER_WORD as u32 - 1);

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Number of bytes printed by a single `dump` command.
pub const DUMP_WINDOW_BYTES: usize = 64;

/// Number of bytes printed on each row of a memory dump.
pub const DUMP_ROW_BYTES: usize = 16;
