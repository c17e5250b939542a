//! Simulation statistics collection and reporting.
//!
//! This module tracks the metrics the driver accumulates across a run. It provides:
//! 1. **Access counts:** Hits, misses, loads, and stores.
//! 2. **Replacement activity:** Evictions and dirty write-backs.
//! 3. **Timing:** Elapsed cycles under the configured hit/miss costs.
//! 4. **Reporting:** The classic `cycles` line, a text summary, and JSON via `serde`.

use serde::Serialize;

use crate::cache::Access;
use crate::common::data::{AccessType, Outcome};

/// Run statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to fetch their block.
    pub misses: u64,
    /// Total cycles charged.
    pub cycles: u64,
    /// Completed `lw` accesses.
    pub loads: u64,
    /// Completed `sw` accesses.
    pub stores: u64,
    /// Misses that displaced a valid block.
    pub evictions: u64,
    /// Evictions whose victim was dirty.
    pub write_backs: u64,
}

impl SimStats {
    /// Records one completed access that cost `cycles`.
    pub const fn record(&mut self, kind: AccessType, access: &Access, cycles: u64) {
        match access.outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
        }
        match kind {
            AccessType::Load => self.loads += 1,
            AccessType::Store => self.stores += 1,
        }
        if let Some(eviction) = access.eviction {
            self.evictions += 1;
            if eviction.written_back {
                self.write_backs += 1;
            }
        }
        self.cycles = self.cycles.saturating_add(cycles);
    }

    /// Total completed accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// The `cycles` command output: hits, misses, and elapsed cycles.
    pub fn cycles_line(&self) -> String {
        format!("{:3} {:3}   {}", self.hits, self.misses, self.cycles)
    }

    /// Multi-line summary for the end of a run.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("==========================================================\n");
        out.push_str("CACHE SIMULATION STATISTICS\n");
        out.push_str("==========================================================\n");
        out.push_str(&format!("accesses                 {}\n", self.accesses()));
        out.push_str(&format!("  loads                  {}\n", self.loads));
        out.push_str(&format!("  stores                 {}\n", self.stores));
        out.push_str(&format!(
            "hits                     {} ({:.2}%)\n",
            self.hits,
            self.hit_rate() * 100.0
        ));
        out.push_str(&format!("misses                   {}\n", self.misses));
        out.push_str(&format!("evictions                {}\n", self.evictions));
        out.push_str(&format!("write_backs              {}\n", self.write_backs));
        out.push_str(&format!("cycles                   {}\n", self.cycles));
        out.push_str("==========================================================\n");
        out
    }
}
