//! ALU shift operations.
//!
//! Implements logical shift left (LSL), logical shift right (LSR), and
//! arithmetic shift right (ASR) on 64-bit values.
//!
//! Shift amounts are taken modulo 64 (the low 6 bits of the amount), for both
//! register and immediate amounts.

use super::AluOp;
use crate::common::constants::SHIFT_MASK;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift variant).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount (low 6 bits used).
///
/// # Returns
///
/// The shifted value, or `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let sh6 = (b & SHIFT_MASK) as u32;
    match op {
        AluOp::Lsl => a << sh6,
        AluOp::Lsr => a >> sh6,
        AluOp::Asr => ((a as i64) >> sh6) as u64,
        _ => 0,
    }
}
