//! Branch Resolution Unit (BRU).
//!
//! Decides whether a conditional branch is taken by evaluating its condition
//! code against the current NZCV flags.

use crate::core::arch::flags::Flags;
use crate::isa::mnemonic::Condition;

/// Returns whether `cond` holds for `flags`.
pub const fn condition_holds(cond: Condition, flags: Flags) -> bool {
    let Flags { n, z, c, v } = flags;
    match cond {
        Condition::Eq => z,
        Condition::Ne => !z,
        Condition::Hs => c,
        Condition::Lo => !c,
        Condition::Mi => n,
        Condition::Pl => !n,
        Condition::Vs => v,
        Condition::Vc => !v,
        Condition::Hi => c && !z,
        Condition::Ls => !c || z,
        Condition::Ge => n == v,
        Condition::Lt => n != v,
        Condition::Gt => !z && n == v,
        Condition::Le => z || n != v,
        Condition::Al => true,
    }
}
