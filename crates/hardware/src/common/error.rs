//! Simulator Error definitions.
//!
//! This module defines the error types reported by the simulator. It provides:
//! 1. **Configuration Errors:** Geometry and memory settings rejected before a run starts.
//! 2. **Access Errors:** Word accesses that violate the engine's caller contract.
//! 3. **Command Errors:** Malformed lines in the command language.
//! 4. **Top-level Errors:** A single wrapper used by the driver and the CLI.
//!
//! A cache hit or miss is never an error; see [`Outcome`](super::data::Outcome).

use thiserror::Error;

use super::data::AccessType;

/// Rejected cache or memory configuration.
///
/// Raised when a [`CacheGeometry`](crate::cache::CacheGeometry) or a
/// [`Memory`](crate::memory::Memory) is built, never during an access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size parameter that must be at least one was zero.
    #[error("{field} must be at least 1")]
    Zero {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// The block count is not a multiple of the associativity.
    #[error("number of blocks ({blocks}) is not a multiple of the number of ways ({ways})")]
    UnevenSets {
        /// Total number of cache blocks.
        blocks: usize,
        /// Requested associativity.
        ways: usize,
    },

    /// Words per block is not a power of two.
    #[error("words per block ({0}) is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// Derived set count is not a power of two.
    #[error("number of sets ({sets} = {blocks} blocks / {ways} ways) is not a power of two")]
    SetCountNotPowerOfTwo {
        /// Derived number of sets.
        sets: usize,
        /// Total number of cache blocks.
        blocks: usize,
        /// Requested associativity.
        ways: usize,
    },

    /// Offset and index fields together need more than 32 address bits.
    #[error("offset ({offset_bits} bits) and index ({index_bits} bits) exceed the 32-bit address")]
    AddressTooNarrow {
        /// Bits consumed by the block offset.
        offset_bits: u32,
        /// Bits consumed by the set index.
        index_bits: u32,
    },

    /// The cache holds more bytes than the memory behind it.
    #[error("cache of {capacity} bytes does not fit in {memory_size} bytes of memory")]
    CacheLargerThanMemory {
        /// Total cache data size in bytes (saturated on overflow).
        capacity: usize,
        /// Configured memory size in bytes.
        memory_size: usize,
    },

    /// The initial memory image does not fit in the configured memory.
    #[error("memory image of {image} bytes does not fit in {size} bytes of memory")]
    ImageTooLarge {
        /// Length of the image in bytes.
        image: usize,
        /// Configured memory size in bytes.
        size: usize,
    },
}

/// Word access that violates the engine's caller contract.
///
/// The engine validates the address before touching any state, so an
/// `AccessError` leaves the cache, memory, and clock exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The block containing the address is not fully backed by memory.
    #[error(
        "{kind} at {addr:#010x}: {len}-byte block at {block_base:#010x} is outside {memory_size} bytes of memory"
    )]
    OutOfRange {
        /// Kind of access that was attempted.
        kind: AccessType,
        /// Requested byte address.
        addr: u32,
        /// Aligned start address of the containing block.
        block_base: u32,
        /// Block size in bytes.
        len: usize,
        /// Size of the backing memory in bytes.
        memory_size: usize,
    },

    /// The address is not aligned to a word boundary.
    #[error("{kind} at {addr:#010x} is not word aligned")]
    Misaligned {
        /// Kind of access that was attempted.
        kind: AccessType,
        /// Requested byte address.
        addr: u32,
    },
}

/// Malformed command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong number of operands; carries the usage text for the command.
    #[error("Wrong input for {command}\nUsage: {usage}")]
    Usage {
        /// Command mnemonic.
        command: &'static str,
        /// Usage line for the command.
        usage: &'static str,
    },

    /// An operand could not be parsed as a number.
    #[error("invalid number `{0}`")]
    BadNumber(String),

    /// The script ended before the three geometry numbers were read.
    #[error("missing {0} in script header")]
    MissingHeader(&'static str),
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Access rejected by the engine.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Command line rejected by the parser.
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Reading a script or configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration file could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}
