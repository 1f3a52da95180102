//! # ALU Tests
//!
//! Deterministic edge cases for arithmetic, logic and shifts on 64-bit
//! two's-complement values, plus flag generation and wrapping properties.

use armsim_core::core::units::alu::{Alu, AluOp};
use proptest::prelude::*;
use rstest::rstest;

const NEG1: u64 = -1i64 as u64;
const I64_MAX: u64 = i64::MAX as u64;
const I64_MIN: u64 = i64::MIN as u64;

#[rstest]
#[case::add(AluOp::Add, 40, 2, 42)]
#[case::add_wraps_signed(AluOp::Add, I64_MAX, 1, I64_MIN)]
#[case::add_wraps_unsigned(AluOp::Add, u64::MAX, 1, 0)]
#[case::sub_below_zero(AluOp::Sub, 0, 1, NEG1)]
#[case::sub_wraps(AluOp::Sub, I64_MIN, 1, I64_MAX)]
#[case::mul(AluOp::Mul, 6, 7, 42)]
#[case::mul_negative(AluOp::Mul, -3i64 as u64, 5, -15i64 as u64)]
#[case::mul_wraps(AluOp::Mul, 1 << 32, 1 << 32, 0)]
#[case::sdiv_truncates(AluOp::Sdiv, -7i64 as u64, 2, -3i64 as u64)]
#[case::sdiv_by_zero(AluOp::Sdiv, 10, 0, 0)]
#[case::sdiv_min_by_neg1(AluOp::Sdiv, I64_MIN, NEG1, I64_MIN)]
#[case::udiv(AluOp::Udiv, NEG1, 2, I64_MAX)]
#[case::udiv_by_zero(AluOp::Udiv, 10, 0, 0)]
#[case::and(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case::orr(AluOp::Orr, 0b1100, 0b1010, 0b1110)]
#[case::eor(AluOp::Eor, 0b1100, 0b1010, 0b0110)]
#[case::lsl(AluOp::Lsl, 1, 4, 16)]
#[case::lsl_amount_mod_64(AluOp::Lsl, 1, 65, 2)]
#[case::lsr(AluOp::Lsr, I64_MIN, 63, 1)]
#[case::asr_keeps_sign(AluOp::Asr, I64_MIN, 63, NEG1)]
#[case::asr_positive(AluOp::Asr, 256, 4, 16)]
fn test_alu_execute(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[test]
fn test_add_flags_signed_overflow() {
    let (result, flags) = Alu::execute_with_flags(AluOp::Add, I64_MAX, 1);
    assert_eq!(result, I64_MIN);
    assert!(flags.n && !flags.z && !flags.c && flags.v);
}

#[test]
fn test_add_flags_unsigned_carry() {
    let (result, flags) = Alu::execute_with_flags(AluOp::Add, u64::MAX, 1);
    assert_eq!(result, 0);
    assert!(!flags.n && flags.z && flags.c && !flags.v);
}

#[test]
fn test_sub_flags_equal_operands() {
    let (_, flags) = Alu::execute_with_flags(AluOp::Sub, 3, 3);
    assert!(!flags.n && flags.z && flags.c && !flags.v);
}

#[test]
fn test_sub_flags_borrow() {
    let (result, flags) = Alu::execute_with_flags(AluOp::Sub, 0, 1);
    assert_eq!(result, NEG1);
    assert!(flags.n && !flags.z && !flags.c && !flags.v);
}

#[test]
fn test_sub_flags_signed_overflow() {
    let (_, flags) = Alu::execute_with_flags(AluOp::Sub, I64_MIN, 1);
    assert!(flags.v && flags.c);
}

#[test]
fn test_logical_flags_clear_carry_and_overflow() {
    let (result, flags) = Alu::execute_with_flags(AluOp::And, NEG1, I64_MIN);
    assert_eq!(result, I64_MIN);
    assert!(flags.n && !flags.z && !flags.c && !flags.v);
}

proptest! {
    #[test]
    fn prop_add_then_sub_is_identity(a: u64, b: u64) {
        let sum = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(Alu::execute(AluOp::Sub, sum, b), a);
    }

    #[test]
    fn prop_add_matches_wrapping_i64(a: i64, b: i64) {
        prop_assert_eq!(Alu::execute(AluOp::Add, a as u64, b as u64) as i64, a.wrapping_add(b));
    }

    #[test]
    fn prop_zero_flag_iff_zero_result(a: u64, b: u64) {
        for op in [AluOp::Add, AluOp::Sub, AluOp::And] {
            let (result, flags) = Alu::execute_with_flags(op, a, b);
            prop_assert_eq!(flags.z, result == 0);
            prop_assert_eq!(flags.n, (result as i64) < 0);
        }
    }

    #[test]
    fn prop_shift_amount_uses_low_six_bits(a: u64, b: u64) {
        for op in [AluOp::Lsl, AluOp::Lsr, AluOp::Asr] {
            prop_assert_eq!(Alu::execute(op, a, b), Alu::execute(op, a, b & 63));
        }
    }
}
