//! Cache Geometry Tests.
//!
//! Verifies the derived address split for representative shapes, the
//! tag/index/offset decomposition, and rejection of every invalid shape.

use cachesim_core::cache::{AddrParts, CacheGeometry};
use cachesim_core::common::ConfigError;
use rstest::rstest;

// ──────────────────────────────────────────────────────────
// Derived fields
// ──────────────────────────────────────────────────────────

#[rstest]
#[case::direct_mapped(4, 16, 1, 16, 4, 4, 24)]
#[case::two_way(4, 16, 2, 8, 4, 3, 25)]
#[case::fully_associative(4, 16, 16, 1, 4, 0, 28)]
#[case::one_word_blocks(1, 8, 2, 4, 2, 2, 28)]
#[case::wide_blocks(32, 4, 2, 2, 7, 1, 24)]
#[case::single_block(1, 1, 1, 1, 2, 0, 30)]
fn derived_fields(
    #[case] words: usize,
    #[case] blocks: usize,
    #[case] ways: usize,
    #[case] sets: usize,
    #[case] offset_bits: u32,
    #[case] index_bits: u32,
    #[case] tag_bits: u32,
) {
    let g = CacheGeometry::new(words, blocks, ways).unwrap();
    assert_eq!(g.num_sets(), sets);
    assert_eq!(g.block_bytes(), words * 4);
    assert_eq!(g.offset_bits(), offset_bits);
    assert_eq!(g.index_bits(), index_bits);
    assert_eq!(g.tag_bits(), tag_bits);
    assert_eq!(g.offset_bits() + g.index_bits() + g.tag_bits(), 32);
}

// ──────────────────────────────────────────────────────────
// Decomposition
// ──────────────────────────────────────────────────────────

/// 16-byte blocks, 2 sets: offset = a % 16, index = (a / 16) % 2, tag = a / 32.
#[rstest]
#[case(0x00, 0, 0, 0)]
#[case(0x04, 0, 0, 4)]
#[case(0x0C, 0, 0, 12)]
#[case(0x10, 0, 1, 0)]
#[case(0x20, 1, 0, 0)]
#[case(0x34, 1, 1, 4)]
#[case(0x1000, 0x80, 0, 0)]
#[case(0xFFFF_FFFC, 0x07FF_FFFF, 1, 12)]
fn decode_matches_integer_division(
    #[case] addr: u32,
    #[case] tag: u32,
    #[case] index: usize,
    #[case] offset: usize,
) {
    let g = CacheGeometry::new(4, 4, 2).unwrap();
    assert_eq!(g.decode(addr), AddrParts { tag, index, offset });
}

#[test]
fn block_address_rebuilds_aligned_start() {
    let g = CacheGeometry::new(4, 8, 2).unwrap();
    // 16-byte blocks, 4 sets: tag shift = 6, index shift = 4.
    assert_eq!(g.block_address(0, 0), 0x00);
    assert_eq!(g.block_address(0, 3), 0x30);
    assert_eq!(g.block_address(1, 0), 0x40);
    assert_eq!(g.block_address(5, 2), 0x160);

    let parts = g.decode(0x16C);
    assert_eq!(g.block_address(parts.tag, parts.index), 0x160);
}

#[test]
fn set_range_is_contiguous_per_set() {
    let g = CacheGeometry::new(2, 16, 4).unwrap();
    assert_eq!(g.set_range(0), 0..4);
    assert_eq!(g.set_range(1), 4..8);
    assert_eq!(g.set_range(3), 12..16);
}

// ──────────────────────────────────────────────────────────
// Rejected shapes
// ──────────────────────────────────────────────────────────

#[rstest]
#[case::zero_words(0, 4, 1, ConfigError::Zero { field: "words per block" })]
#[case::zero_blocks(4, 0, 1, ConfigError::Zero { field: "number of blocks" })]
#[case::zero_ways(4, 4, 0, ConfigError::Zero { field: "number of ways" })]
#[case::uneven_sets(4, 10, 4, ConfigError::UnevenSets { blocks: 10, ways: 4 })]
#[case::odd_block(3, 4, 1, ConfigError::BlockSizeNotPowerOfTwo(3))]
#[case::three_sets(4, 6, 2, ConfigError::SetCountNotPowerOfTwo { sets: 3, blocks: 6, ways: 2 })]
#[case::block_bytes_overflow(1 << 62, 1, 1, ConfigError::AddressTooNarrow { offset_bits: 64, index_bits: 0 })]
fn invalid_shapes_are_rejected(
    #[case] words: usize,
    #[case] blocks: usize,
    #[case] ways: usize,
    #[case] expected: ConfigError,
) {
    assert_eq!(CacheGeometry::new(words, blocks, ways), Err(expected));
}

#[test]
fn split_wider_than_address_is_rejected() {
    // 2^30 words = 2^32-byte blocks: the offset alone fills the address.
    let err = CacheGeometry::new(1 << 30, 2, 1).unwrap_err();
    assert_eq!(
        err,
        ConfigError::AddressTooNarrow {
            offset_bits: 32,
            index_bits: 1
        }
    );
}
