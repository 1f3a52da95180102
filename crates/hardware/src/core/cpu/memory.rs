//! Memory Access Handling.
//!
//! Address generation for `[base, offset]` operands and checked loads and
//! stores against data memory. Out-of-range accesses become `MemoryFault`s
//! tagged with the source line of the faulting instruction.

use super::Cpu;
use crate::common::error::ExecutionError;
use crate::isa::instruction::{Offset, Reg};

impl Cpu {
    /// Computes `base + offset` with wrapping arithmetic.
    pub fn effective_address(&self, base: Reg, offset: Offset) -> u64 {
        let base = self.regs.get(base);
        let offset = match offset {
            Offset::Immediate(imm) => imm as u64,
            Offset::Register(reg) => self.regs.get(reg),
        };
        base.wrapping_add(offset)
    }

    /// Loads a little-endian 64-bit value.
    pub fn load_u64(&self, address: u64, line: usize) -> Result<u64, ExecutionError> {
        self.memory
            .read_u64(address)
            .ok_or(ExecutionError::MemoryFault {
                line,
                address,
                size: 8,
            })
    }

    /// Loads a single byte, zero-extended.
    pub fn load_u8(&self, address: u64, line: usize) -> Result<u64, ExecutionError> {
        self.memory
            .read_u8(address)
            .map(u64::from)
            .ok_or(ExecutionError::MemoryFault {
                line,
                address,
                size: 1,
            })
    }

    /// Stores a little-endian 64-bit value.
    pub fn store_u64(&mut self, address: u64, val: u64, line: usize) -> Result<(), ExecutionError> {
        self.memory
            .write_u64(address, val)
            .ok_or(ExecutionError::MemoryFault {
                line,
                address,
                size: 8,
            })
    }

    /// Stores the low byte of `val`.
    pub fn store_u8(&mut self, address: u64, val: u64, line: usize) -> Result<(), ExecutionError> {
        self.memory
            .write_u8(address, val as u8)
            .ok_or(ExecutionError::MemoryFault {
                line,
                address,
                size: 1,
            })
    }
}
