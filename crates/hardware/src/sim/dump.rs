//! Cache and Memory Dumps.
//!
//! Text renderings for the `show` and `dump` commands. Both are read-only views
//! over the simulator state.

use std::fmt::Write;

use crate::cache::CacheSim;
use crate::common::constants::{BYTES_PER_WORD, DUMP_ROW_BYTES, DUMP_WINDOW_BYTES};
use crate::memory::Memory;

/// Renders every block of the cache, one line per block.
///
/// Each line is `[idx] vd tag timestamp | data`, where `v` and `d` are blank
/// when the block is invalid or clean. Sets are separated by a blank line when
/// the cache has more than one way.
pub fn format_cache(cache: &CacheSim) -> String {
    let ways = cache.geometry().ways();
    let mut out = String::new();
    for (i, block) in cache.blocks().iter().enumerate() {
        let _ = write!(
            out,
            "[{i:3}] {}{} {:8x} {:8} | ",
            if block.valid() { 'v' } else { ' ' },
            if block.dirty() { 'd' } else { ' ' },
            block.tag(),
            block.timestamp()
        );
        for word in block.data().chunks(BYTES_PER_WORD) {
            for byte in word {
                let _ = write!(out, "{byte:02x}");
            }
            out.push(' ');
        }
        out.push('\n');
        if ways > 1 && (i + 1) % ways == 0 {
            out.push('\n');
        }
    }
    out
}

/// Renders the 64 bytes of memory starting at `start`, 16 bytes per row.
///
/// Rows are labelled at 16-byte boundaries. Bytes past the end of memory are
/// not printed.
pub fn format_memory(memory: &Memory, start: u32) -> String {
    let mut out = String::new();
    let start = start as usize;
    let end = start.saturating_add(DUMP_WINDOW_BYTES).min(memory.len());
    let bytes = memory.as_bytes();
    for i in start..end {
        if i % DUMP_ROW_BYTES == 0 {
            let _ = write!(out, "[{i:#010x}] ");
        }
        let _ = write!(out, "{:02x}", bytes[i]);
        if (i + 1) % BYTES_PER_WORD == 0 {
            out.push(' ');
        }
        if (i + 1) % DUMP_ROW_BYTES == 0 {
            out.push('\n');
        }
    }
    out
}
