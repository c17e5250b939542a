//! Simulation driver.
//!
//! This module drives the cache engine. It provides:
//! 1. **Simulator:** Owns the engine and statistics and charges hit/miss costs.
//! 2. **Commands:** Parser for the `lw`/`sw`/`show`/`dump`/`cycles` language.
//! 3. **Scripts:** Header reader and line runner shared by files and the REPL.
//! 4. **Dumps:** Text renderings of the cache and of memory.

/// Command-language parser.
pub mod command;

/// `show` and `dump` renderings.
pub mod dump;

/// Script header and command runner.
pub mod script;

/// Simulator struct (engine + statistics).
pub mod simulator;

pub use command::Command;
pub use script::Flow;
pub use simulator::Simulator;
