//! Register File.
//!
//! This module provides the `RegisterFile` struct, the architectural register
//! state visible to programs and to the caller after a run. It provides:
//! 1. **Storage:** General-purpose registers `x0`-`x30`, the stack pointer and NZCV flags.
//! 2. **Operand Access:** Index-based reads and writes used by the execution engine.
//! 3. **Name Access:** String-keyed `read`/`write` for callers, failing on unknown names.
//! 4. **Observability:** A formatted dump and a non-zero register iterator.

use std::fmt;

use crate::common::constants::GPR_COUNT;
use crate::common::error::RegisterError;
use crate::core::arch::flags::Flags;
use crate::core::arch::gpr::Gpr;
use crate::isa::instruction::Reg;

/// Architectural register state.
///
/// `x0` has no special meaning here; treating it as an exit status is the
/// caller's convention.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
    sp: u64,
    flags: Flags,
}

impl RegisterFile {
    /// Creates a register file with every register, `sp` and the flags zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all registers and flags and sets the stack pointer.
    pub fn reset(&mut self, sp: u64) {
        self.gpr.clear();
        self.sp = sp;
        self.flags = Flags::default();
    }

    /// Reads the raw 64-bit value of an operand register.
    pub fn get(&self, reg: Reg) -> u64 {
        match reg {
            Reg::X(idx) => self.gpr.read(idx as usize),
            Reg::Sp => self.sp,
            Reg::Zero => 0,
        }
    }

    /// Writes the raw 64-bit value of an operand register. Writes to `xzr` are discarded.
    pub fn set(&mut self, reg: Reg, val: u64) {
        match reg {
            Reg::X(idx) => self.gpr.write(idx as usize, val),
            Reg::Sp => self.sp = val,
            Reg::Zero => {}
        }
    }

    /// Reads a register by name as a signed 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `name` - `x0`-`x30`, `sp`, or the aliases `xzr`, `lr`, `fp` (case-insensitive).
    ///
    /// # Errors
    ///
    /// `RegisterError::UnknownRegister` if the name is not recognised.
    pub fn read(&self, name: &str) -> Result<i64, RegisterError> {
        let reg = Self::lookup(name)?;
        Ok(self.get(reg) as i64)
    }

    /// Writes a register by name.
    ///
    /// # Errors
    ///
    /// `RegisterError::UnknownRegister` if the name is not recognised.
    pub fn write(&mut self, name: &str, value: i64) -> Result<(), RegisterError> {
        let reg = Self::lookup(name)?;
        self.set(reg, value as u64);
        Ok(())
    }

    /// Enumerates every register name the file models: `x0`..`x30`, then `sp`.
    pub fn names() -> impl Iterator<Item = String> {
        (0..GPR_COUNT)
            .map(|i| format!("x{i}"))
            .chain(std::iter::once("sp".to_string()))
    }

    /// Current NZCV flags.
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Replaces the NZCV flags.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Iterates over general-purpose registers holding a non-zero value, as `(index, value)`.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.gpr
            .iter()
            .filter(|&(_, v)| v != 0)
            .map(|(i, v)| (i, v as i64))
    }

    fn lookup(name: &str) -> Result<Reg, RegisterError> {
        Reg::from_name(name).ok_or_else(|| RegisterError::UnknownRegister(name.to_string()))
    }
}

impl fmt::Display for RegisterFile {
    /// Dumps registers in pairs with hexadecimal formatting, followed by `sp` and the flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs: Vec<(usize, u64)> = self.gpr.iter().collect();
        for pair in regs.chunks(2) {
            let line = pair
                .iter()
                .map(|(i, v)| format!("x{i:<2}={v:#018x}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        write!(f, "sp ={:#018x} nzcv={}", self.sp, self.flags)
    }
}
