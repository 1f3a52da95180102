//! ALU bitwise logical operations.
//!
//! Implements AND, OR (`orr`) and exclusive OR (`eor`) on 64-bit values.

use super::AluOp;

/// Executes a logical operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logical variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result, or `0` for non-logical opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        AluOp::Orr => a | b,
        AluOp::Eor => a ^ b,
        _ => 0,
    }
}
