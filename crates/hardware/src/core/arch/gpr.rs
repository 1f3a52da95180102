//! General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 31 64-bit registers (`x0`-`x30`).
//! 2. **Uniformity:** Every register, including `x0`, is an ordinary read/write cell;
//!    the zero register is modelled separately as an operand, not as storage.
//! 3. **Debugging:** Provides iteration over the complete register state.

use crate::common::constants::GPR_COUNT;

/// General-Purpose Register file.
///
/// Contains 31 registers used for integer operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-30). Out-of-range indices read as 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register.
    pub fn read(&self, idx: usize) -> u64 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-30). Out-of-range writes are dropped.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Clears every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; GPR_COUNT];
    }

    /// Iterates over `(index, value)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.regs.iter().copied().enumerate()
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
