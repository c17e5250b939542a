//! `show` and `dump` Rendering Tests.

use cachesim_core::config::{CacheConfig, Config};
use cachesim_core::memory::Memory;
use cachesim_core::sim::dump::{format_cache, format_memory};
use cachesim_core::Simulator;
use pretty_assertions::assert_eq;

/// Default memory image; one-word blocks in a single 2-way set.
fn tiny() -> Simulator {
    let config = Config {
        cache: CacheConfig::new(1, 2, 2),
        ..Config::default()
    };
    Simulator::new(&config).unwrap()
}

#[test]
fn show_on_cold_cache_lists_invalid_blocks() {
    let sim = tiny();
    let expected = concat!(
        "[  0]    ", "       0 ", "       0", " | 00000000 \n",
        "[  1]    ", "       0 ", "       0", " | 00000000 \n",
        "\n",
    );
    assert_eq!(format_cache(&sim.cache), expected);
}

#[test]
fn show_marks_valid_and_dirty_blocks() {
    let mut sim = tiny();
    let _ = sim.load_word(0x00).unwrap();
    let _ = sim.store_word(0x1C, 5).unwrap();
    let expected = concat!(
        "[  0] v  ", "       0 ", "       0", " | deadbeef \n",
        "[  1] vd ", "       7 ", "     100", " | 00000005 \n",
        "\n",
    );
    assert_eq!(format_cache(&sim.cache), expected);
}

#[test]
fn show_separates_sets_only_when_associative() {
    let config = Config {
        cache: CacheConfig::new(2, 2, 1),
        ..Config::default()
    };
    let sim = Simulator::new(&config).unwrap();
    let text = format_cache(&sim.cache);
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|l| l.ends_with("| 00000000 00000000 ")));
}

#[test]
fn dump_prints_sixty_four_bytes_from_start() {
    let sim = Simulator::new(&Config::default()).unwrap();
    let expected = concat!(
        "[0x00000000] deadbeef badacafe 01234567 89abcdef \n",
        "[0x00000010] 00112233 44556677 8899aabb ccddeeff \n",
        "[0x00000020] 68656c6c 6f20776f 726c6421 89abcdef \n",
        "[0x00000030] 50525456 585a5c5e 60626466 686a6c6e \n",
    );
    assert_eq!(format_memory(sim.cache.memory(), 0), expected);
}

#[test]
fn dump_from_mid_row_labels_row_boundaries_only() {
    let sim = Simulator::new(&Config::default()).unwrap();
    let text = format_memory(sim.cache.memory(), 0x08);
    assert!(text.starts_with("01234567 89abcdef \n[0x00000010] "));
    assert!(text.ends_with("[0x00000040] 70727476 787a7c7e "));
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn dump_stops_at_end_of_memory() {
    let mem = Memory::with_image(20, &[0xAA; 20]).unwrap();
    assert_eq!(
        format_memory(&mem, 0),
        "[0x00000000] aaaaaaaa aaaaaaaa aaaaaaaa aaaaaaaa \n[0x00000010] aaaaaaaa "
    );
    assert_eq!(format_memory(&mem, 0x100), "");
}
