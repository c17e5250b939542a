use std::collections::HashMap;

use cachesim_core::common::Outcome;

/// Recency-list model of an LRU cache plus a flat view of memory.
///
/// Tracks which blocks are resident (most recent last in each set) and the
/// value every word should have from the program's point of view.
#[derive(Debug)]
pub struct ReferenceCache {
    block_bytes: u32,
    ways: usize,
    sets: Vec<Vec<u32>>,
    words: HashMap<u32, u32>,
}

impl ReferenceCache {
    pub fn new(words_per_block: usize, blocks: usize, ways: usize) -> Self {
        Self {
            block_bytes: (words_per_block * 4) as u32,
            ways,
            sets: vec![Vec::new(); blocks / ways],
            words: HashMap::new(),
        }
    }

    /// Touches the block holding `addr` and reports hit or miss.
    pub fn access(&mut self, addr: u32) -> Outcome {
        let block = addr / self.block_bytes;
        let num_sets = self.sets.len();
        let set = &mut self.sets[block as usize % num_sets];
        if let Some(pos) = set.iter().position(|&b| b == block) {
            let _ = set.remove(pos);
            set.push(block);
            Outcome::Hit
        } else {
            if set.len() == self.ways {
                let _ = set.remove(0);
            }
            set.push(block);
            Outcome::Miss
        }
    }

    pub fn store(&mut self, addr: u32, value: u32) {
        let _ = self.words.insert(addr, value);
    }

    /// Last value stored at `addr`, or `initial` if never written.
    pub fn value(&self, addr: u32, initial: u32) -> u32 {
        self.words.get(&addr).copied().unwrap_or(initial)
    }
}
