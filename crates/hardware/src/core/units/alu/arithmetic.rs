//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication, and division
//! on 64-bit two's-complement values. Every operation wraps on overflow;
//! nothing here traps.
//!
//! Division follows the AArch64 rules: a zero divisor yields 0, and
//! `i64::MIN / -1` yields `i64::MIN`.

use super::AluOp;
use crate::core::arch::flags::Flags;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand (64-bit value).
/// * `b`  - Second operand (64-bit value).
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Sdiv => {
            if b == 0 {
                0
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            }
        }
        AluOp::Udiv => a.checked_div(b).unwrap_or(0),
        _ => 0,
    }
}

/// Adds two values and computes the resulting NZCV flags.
pub fn add_with_flags(a: u64, b: u64) -> (u64, Flags) {
    let (result, carry) = a.overflowing_add(b);
    let (_, overflow) = (a as i64).overflowing_add(b as i64);
    let flags = Flags {
        n: (result as i64) < 0,
        z: result == 0,
        c: carry,
        v: overflow,
    };
    (result, flags)
}

/// Subtracts `b` from `a` and computes the resulting NZCV flags.
///
/// C is set when no borrow occurs (`a >= b` unsigned).
pub fn sub_with_flags(a: u64, b: u64) -> (u64, Flags) {
    let result = a.wrapping_sub(b);
    let (_, overflow) = (a as i64).overflowing_sub(b as i64);
    let flags = Flags {
        n: (result as i64) < 0,
        z: result == 0,
        c: a >= b,
        v: overflow,
    };
    (result, flags)
}
