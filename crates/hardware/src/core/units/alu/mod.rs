//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the executor. All operations
//! act on 64-bit two's-complement bit patterns and wrap on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Sdiv, Udiv, and the flag-setting add/sub
//! - [`logic`]:      And, Orr, Eor
//! - [`shifts`]:     Lsl, Lsr, Asr

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, orr, eor).
pub mod logic;

/// Shift operations (lsl, lsr, asr).
pub mod shifts;

use crate::core::arch::flags::Flags;
use crate::isa::mnemonic::Mnemonic;

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication (low 64 bits).
    Mul,
    /// Signed division.
    Sdiv,
    /// Unsigned division.
    Udiv,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Orr,
    /// Bitwise exclusive OR.
    Eor,
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
}

impl AluOp {
    /// Maps a three-operand data-processing mnemonic to its ALU operation.
    pub const fn from_mnemonic(mnemonic: Mnemonic) -> Option<Self> {
        Some(match mnemonic {
            Mnemonic::Add | Mnemonic::Adds => Self::Add,
            Mnemonic::Sub | Mnemonic::Subs => Self::Sub,
            Mnemonic::Mul => Self::Mul,
            Mnemonic::Sdiv => Self::Sdiv,
            Mnemonic::Udiv => Self::Udiv,
            Mnemonic::And | Mnemonic::Ands => Self::And,
            Mnemonic::Orr => Self::Orr,
            Mnemonic::Eor => Self::Eor,
            Mnemonic::Lsl => Self::Lsl,
            Mnemonic::Lsr => Self::Lsr,
            Mnemonic::Asr => Self::Asr,
            _ => return None,
        })
    }

    /// True for the division operations.
    pub const fn is_division(self) -> bool {
        matches!(self, Self::Sdiv | Self::Udiv)
    }
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use armsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, i64::MAX as u64, 1), i64::MIN as u64);
    /// assert_eq!(Alu::execute(AluOp::Lsl, 1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Sdiv, (-7_i64) as u64, 2), (-3_i64) as u64);
    /// assert_eq!(Alu::execute(AluOp::Udiv, 100, 0), 0);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Sdiv | AluOp::Udiv => {
                arithmetic::execute(op, a, b)
            }
            AluOp::And | AluOp::Orr | AluOp::Eor => logic::execute(op, a, b),
            AluOp::Lsl | AluOp::Lsr | AluOp::Asr => shifts::execute(op, a, b),
        }
    }

    /// Executes an operation and derives NZCV flags from it.
    ///
    /// Add and Sub produce full NZCV; logical operations set N and Z and clear C and V.
    pub fn execute_with_flags(op: AluOp, a: u64, b: u64) -> (u64, Flags) {
        match op {
            AluOp::Add => arithmetic::add_with_flags(a, b),
            AluOp::Sub => arithmetic::sub_with_flags(a, b),
            _ => {
                let result = Self::execute(op, a, b);
                (result, Flags::from_logical(result))
            }
        }
    }
}
