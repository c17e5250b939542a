//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Word width, address width, and dump layout.
//! 2. **Access Types:** Load/store classification and the hit/miss outcome.
//! 3. **Error Handling:** Configuration, access, command, and top-level error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Access type and outcome definitions.
pub mod data;

/// Error types.
pub mod error;

pub use constants::BYTES_PER_WORD;
pub use data::{AccessType, Outcome};
pub use error::{AccessError, CommandError, ConfigError, SimError};
