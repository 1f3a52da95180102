//! Data Memory Buffer.
//!
//! This module provides the flat, byte-addressed data memory a program sees.
//! It holds the assembled data image at the base address followed by free
//! space used by the stack. All multi-byte accesses are little-endian; any
//! access that does not lie entirely inside the buffer is rejected.

use crate::common::constants::{MAX_MEMORY_SIZE, STACK_ALIGN};

/// Flat little-endian data memory mapped at a fixed base address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataMemory {
    base: u64,
    bytes: Vec<u8>,
}

impl DataMemory {
    /// Creates a memory holding `image` at `base` followed by `free` zeroed bytes.
    ///
    /// The image is padded to the stack alignment so the top of memory is aligned.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first byte.
    /// * `image` - Initial contents (the assembled data section).
    /// * `free` - Additional zeroed bytes after the image.
    ///
    /// # Returns
    ///
    /// `None` when `free` exceeds [`MAX_MEMORY_SIZE`], the total size overflows,
    /// the buffer would extend past the end of the address space, or the host
    /// cannot reserve it.
    pub fn new(base: u64, image: &[u8], free: usize) -> Option<Self> {
        if free > MAX_MEMORY_SIZE {
            return None;
        }
        let align = STACK_ALIGN as usize;
        let padded = image.len().checked_next_multiple_of(align)?;
        let len = padded.checked_add(free)?;
        let _ = base.checked_add(len as u64)?;
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len).ok()?;
        bytes.extend_from_slice(image);
        bytes.resize(len, 0);
        Some(Self { base, bytes })
    }

    /// Address of the first byte.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One past the last valid address, aligned down to the stack alignment.
    pub fn top(&self) -> u64 {
        self.base.wrapping_add(self.bytes.len() as u64) & !(STACK_ALIGN - 1)
    }

    fn range(&self, addr: u64, len: u64) -> Option<std::ops::Range<usize>> {
        let offset = addr.checked_sub(self.base)?;
        let end = offset.checked_add(len)?;
        if end > self.bytes.len() as u64 {
            return None;
        }
        Some(offset as usize..end as usize)
    }

    /// Reads `len` bytes starting at `addr`.
    pub fn read_slice(&self, addr: u64, len: u64) -> Option<&[u8]> {
        self.range(addr, len).map(|r| &self.bytes[r])
    }

    /// Reads a single byte.
    pub fn read_u8(&self, addr: u64) -> Option<u8> {
        self.read_slice(addr, 1).map(|b| b[0])
    }

    /// Reads a little-endian 64-bit value.
    pub fn read_u64(&self, addr: u64) -> Option<u64> {
        let bytes = self.read_slice(addr, 8)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        Some(u64::from_le_bytes(word))
    }

    /// Writes `data` starting at `addr`. Returns `None` if out of range.
    pub fn write_slice(&mut self, addr: u64, data: &[u8]) -> Option<()> {
        let r = self.range(addr, data.len() as u64)?;
        self.bytes[r].copy_from_slice(data);
        Some(())
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, addr: u64, val: u8) -> Option<()> {
        self.write_slice(addr, &[val])
    }

    /// Writes a little-endian 64-bit value.
    pub fn write_u64(&mut self, addr: u64, val: u64) -> Option<()> {
        self.write_slice(addr, &val.to_le_bytes())
    }
}
