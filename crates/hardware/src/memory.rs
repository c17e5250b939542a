//! Backing Memory.
//!
//! This module implements the flat, byte-addressable main memory behind the cache.
//! It provides:
//! 1. **Storage:** A `Vec<u8>` sized once at construction and seeded from an image.
//! 2. **Block Transfer:** Range-checked slice reads and writes used for fills and write-backs.
//! 3. **Word Access:** Big-endian 32-bit helpers for diagnostics and tests.
//!
//! Memory is authoritative for every byte that is not shadowed by a dirty cache block.

use std::ops::Range;

use crate::common::error::ConfigError;
use crate::config::MemoryConfig;

/// Main memory of the simulated machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
    image: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_image(size, &[])
    }

    /// Creates a memory of `size` bytes whose low end holds `image`.
    ///
    /// The image is kept so that [`Memory::restore`] can rebuild the same contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] if `size` is zero and
    /// [`ConfigError::ImageTooLarge`] if the image does not fit.
    pub fn with_image(size: usize, image: &[u8]) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::Zero {
                field: "memory size",
            });
        }
        if image.len() > size {
            return Err(ConfigError::ImageTooLarge {
                image: image.len(),
                size,
            });
        }
        let mut memory = Self {
            bytes: vec![0; size],
            image: image.to_vec(),
        };
        memory.restore();
        Ok(memory)
    }

    /// Builds the memory described by a [`MemoryConfig`].
    ///
    /// # Errors
    ///
    /// See [`Memory::with_image`].
    pub fn from_config(config: &MemoryConfig) -> Result<Self, ConfigError> {
        Self::with_image(config.size_bytes, &config.image)
    }

    /// Resets every byte to the initial image (zero past its end).
    pub fn restore(&mut self) {
        self.bytes.fill(0);
        self.bytes[..self.image.len()].copy_from_slice(&self.image);
    }

    /// Returns the size of the memory in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the memory holds no bytes. Never true for a constructed memory.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the whole memory as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the byte range `[addr, addr + len)` if it lies entirely inside memory.
    pub fn range(&self, addr: u32, len: usize) -> Option<Range<usize>> {
        let start = addr as usize;
        let end = start.checked_add(len)?;
        (end <= self.bytes.len()).then_some(start..end)
    }

    /// Reads `len` bytes starting at `addr`.
    ///
    /// Returns `None` if any part of the range is outside memory.
    pub fn read_slice(&self, addr: u32, len: usize) -> Option<&[u8]> {
        self.range(addr, len).map(|r| &self.bytes[r])
    }

    /// Writes `data` starting at `addr`.
    ///
    /// Returns `false` and leaves memory untouched if any part of the range is
    /// outside memory.
    pub fn write_slice(&mut self, addr: u32, data: &[u8]) -> bool {
        match self.range(addr, data.len()) {
            Some(r) => {
                self.bytes[r].copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    /// Reads the big-endian word at `addr`, bypassing any cache.
    pub fn read_word(&self, addr: u32) -> Option<u32> {
        let bytes = self.read_slice(addr, 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Writes `value` big-endian at `addr`, bypassing any cache.
    pub fn write_word(&mut self, addr: u32, value: u32) -> bool {
        self.write_slice(addr, &value.to_be_bytes())
    }
}
