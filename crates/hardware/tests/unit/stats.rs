//! Statistics Tests.
//!
//! Counter updates, the `cycles` line, and the serialized form.

use cachesim_core::cache::{Access, Eviction};
use cachesim_core::common::{AccessType, Outcome};
use cachesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

fn access(outcome: Outcome, eviction: Option<Eviction>) -> Access {
    Access {
        outcome,
        set: 0,
        way: 0,
        value: 0,
        eviction,
    }
}

#[test]
fn record_counts_outcomes_kinds_and_evictions() {
    let mut stats = SimStats::default();
    stats.record(AccessType::Load, &access(Outcome::Miss, None), 100);
    stats.record(AccessType::Store, &access(Outcome::Hit, None), 1);
    stats.record(
        AccessType::Load,
        &access(
            Outcome::Miss,
            Some(Eviction {
                block_addr: 0x40,
                written_back: true,
            }),
        ),
        100,
    );
    stats.record(
        AccessType::Store,
        &access(
            Outcome::Miss,
            Some(Eviction {
                block_addr: 0x80,
                written_back: false,
            }),
        ),
        100,
    );

    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 3,
            cycles: 301,
            loads: 2,
            stores: 2,
            evictions: 2,
            write_backs: 1,
        }
    );
    assert_eq!(stats.accesses(), 4);
    assert!((stats.hit_rate() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn hit_rate_is_zero_before_any_access() {
    assert!(SimStats::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn cycles_line_pads_counts() {
    let stats = SimStats {
        hits: 1,
        misses: 3,
        cycles: 301,
        ..SimStats::default()
    };
    assert_eq!(stats.cycles_line(), "  1   3   301");

    let stats = SimStats {
        hits: 1234,
        misses: 5,
        cycles: 1734,
        ..SimStats::default()
    };
    assert_eq!(stats.cycles_line(), "1234   5   1734");
}

#[test]
fn summary_lists_every_counter() {
    let stats = SimStats {
        hits: 3,
        misses: 1,
        cycles: 103,
        loads: 2,
        stores: 2,
        evictions: 0,
        write_backs: 0,
    };
    let summary = stats.summary();
    assert!(summary.contains("accesses                 4\n"));
    assert!(summary.contains("hits                     3 (75.00%)\n"));
    assert!(summary.contains("cycles                   103\n"));
}

#[test]
fn serializes_as_flat_json() {
    let stats = SimStats {
        hits: 2,
        misses: 1,
        cycles: 102,
        loads: 3,
        ..SimStats::default()
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "hits": 2,
            "misses": 1,
            "cycles": 102,
            "loads": 3,
            "stores": 0,
            "evictions": 0,
            "write_backs": 0,
        })
    );
}
