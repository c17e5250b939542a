//! Randomized Cache Properties.
//!
//! Runs random load/store sequences through the engine and through the
//! recency-list model in `common::model`, over a small address window so that
//! sets overflow often, and checks that both agree on every outcome and value.

use std::collections::HashSet;

use proptest::prelude::*;

use cachesim_core::cache::{CacheGeometry, CacheSim};
use cachesim_core::common::Outcome;

use crate::common::harness::{cache, load, marker, store};
use crate::common::model::ReferenceCache;

/// Words in the address window touched by generated traces (512 bytes).
const WINDOW_WORDS: u32 = 128;

fn shape() -> impl Strategy<Value = (usize, usize, usize)> {
    prop_oneof![
        Just((1, 4, 1)),
        Just((1, 4, 4)),
        Just((4, 4, 2)),
        Just((2, 8, 2)),
        Just((4, 16, 4)),
        Just((8, 8, 8)),
    ]
}

/// `(is_store, word index, value)`.
fn op() -> impl Strategy<Value = (bool, u32, u32)> {
    (any::<bool>(), 0..WINDOW_WORDS, any::<u32>())
}

/// No set may hold the same tag twice.
fn assert_unique_tags(cache: &CacheSim) {
    let g = cache.geometry();
    for set in 0..g.num_sets() {
        let mut seen = HashSet::new();
        for block in &cache.blocks()[g.set_range(set)] {
            if block.valid() {
                assert!(seen.insert(block.tag()), "duplicate tag {:#x} in set {set}", block.tag());
            }
        }
    }
}

/// Clean resident blocks are byte-identical to memory.
fn assert_clean_blocks_match_memory(cache: &CacheSim) {
    let g = cache.geometry();
    for set in 0..g.num_sets() {
        for block in &cache.blocks()[g.set_range(set)] {
            if block.valid() && !block.dirty() {
                let base = g.block_address(block.tag(), set);
                assert_eq!(Some(block.data()), cache.memory().read_slice(base, g.block_bytes()));
            }
        }
    }
}

proptest! {
    #[test]
    fn decode_then_rebuild_is_identity((w, b, a) in shape(), addr in any::<u32>()) {
        let g = CacheGeometry::new(w, b, a).unwrap();
        let parts = g.decode(addr);
        prop_assert!(parts.index < g.num_sets());
        prop_assert!(parts.offset < g.block_bytes());
        prop_assert_eq!(g.block_address(parts.tag, parts.index) + parts.offset as u32, addr);
    }

    #[test]
    fn engine_agrees_with_reference_model(
        (w, b, a) in shape(),
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let mut sim = cache(w, b, a);
        let mut model = ReferenceCache::new(w, b, a);

        for (is_store, word, value) in ops {
            let addr = word * 4;
            let expected = model.access(addr);
            let access = if is_store {
                model.store(addr, value);
                store(&mut sim, addr, value)
            } else {
                load(&mut sim, addr)
            };
            prop_assert_eq!(access.outcome, expected, "addr {:#x}", addr);
            prop_assert_eq!(access.value, model.value(addr, marker(addr)));
            if access.outcome == Outcome::Hit {
                prop_assert_eq!(access.eviction, None);
            }
        }

        assert_unique_tags(&sim);
        assert_clean_blocks_match_memory(&sim);
        for word in 0..WINDOW_WORDS {
            let addr = word * 4;
            prop_assert_eq!(sim.peek_word(addr), Some(model.value(addr, marker(addr))));
        }
    }

    #[test]
    fn loads_never_change_memory(
        (w, b, a) in shape(),
        words in prop::collection::vec(0..WINDOW_WORDS, 1..100),
    ) {
        let mut sim = cache(w, b, a);
        let initial = sim.memory().clone();
        for word in words {
            let access = load(&mut sim, word * 4);
            prop_assert_eq!(access.value, marker(word * 4));
            prop_assert!(access.eviction.is_none_or(|e| !e.written_back));
        }
        prop_assert!(sim.blocks().iter().all(|blk| !blk.dirty()));
        prop_assert_eq!(sim.memory(), &initial);
    }
}
