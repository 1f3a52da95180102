//! # Branch Condition Tests
//!
//! Conditions are evaluated on the flags a `cmp a, b` would produce.

use armsim_core::core::units::alu::{Alu, AluOp};
use armsim_core::core::units::bru::condition_holds;
use armsim_core::isa::Condition;
use rstest::rstest;

fn cmp_holds(a: i64, b: i64, cond: Condition) -> bool {
    let (_, flags) = Alu::execute_with_flags(AluOp::Sub, a as u64, b as u64);
    condition_holds(cond, flags)
}

#[rstest]
#[case(1, 1, Condition::Eq, true)]
#[case(1, 2, Condition::Eq, false)]
#[case(1, 2, Condition::Ne, true)]
#[case(-1, 1, Condition::Lt, true)]
#[case(-1, 1, Condition::Ge, false)]
#[case(-1, 1, Condition::Lo, false)]
#[case(-1, 1, Condition::Hi, true)]
#[case(2, 2, Condition::Hs, true)]
#[case(2, 2, Condition::Ls, true)]
#[case(3, 2, Condition::Gt, true)]
#[case(2, 2, Condition::Gt, false)]
#[case(2, 2, Condition::Le, true)]
#[case(0, 1, Condition::Mi, true)]
#[case(1, 0, Condition::Pl, true)]
#[case(i64::MIN, 1, Condition::Vs, true)]
#[case(5, 1, Condition::Vc, true)]
#[case(i64::MIN, 1, Condition::Lt, true)]
#[case(7, 9, Condition::Al, true)]
fn test_condition_after_compare(
    #[case] a: i64,
    #[case] b: i64,
    #[case] cond: Condition,
    #[case] expected: bool,
) {
    assert_eq!(cmp_holds(a, b, cond), expected);
}
