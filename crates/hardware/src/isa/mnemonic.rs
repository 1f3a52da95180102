//! The closed set of supported operations.
//!
//! Each [`Mnemonic`] declares the operand forms it accepts; the parser checks
//! every instruction against these forms so the executor can rely on them.

use std::fmt;

use crate::isa::instruction::Operand;

/// Branch condition codes, evaluated against the NZCV flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Equal (Z).
    Eq,
    /// Not equal (!Z).
    Ne,
    /// Unsigned higher or same (C). Alias `cs`.
    Hs,
    /// Unsigned lower (!C). Alias `cc`.
    Lo,
    /// Negative (N).
    Mi,
    /// Positive or zero (!N).
    Pl,
    /// Overflow (V).
    Vs,
    /// No overflow (!V).
    Vc,
    /// Unsigned higher (C && !Z).
    Hi,
    /// Unsigned lower or same (!C || Z).
    Ls,
    /// Signed greater or equal (N == V).
    Ge,
    /// Signed less than (N != V).
    Lt,
    /// Signed greater than (!Z && N == V).
    Gt,
    /// Signed less or equal (Z || N != V).
    Le,
    /// Always.
    Al,
}

impl Condition {
    /// Parses a lowercase condition suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "hs" | "cs" => Self::Hs,
            "lo" | "cc" => Self::Lo,
            "mi" => Self::Mi,
            "pl" => Self::Pl,
            "vs" => Self::Vs,
            "vc" => Self::Vc,
            "hi" => Self::Hi,
            "ls" => Self::Ls,
            "ge" => Self::Ge,
            "lt" => Self::Lt,
            "gt" => Self::Gt,
            "le" => Self::Le,
            "al" => Self::Al,
            _ => return None,
        })
    }

    /// Canonical suffix text.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Hs => "hs",
            Self::Lo => "lo",
            Self::Mi => "mi",
            Self::Pl => "pl",
            Self::Vs => "vs",
            Self::Vc => "vc",
            Self::Hi => "hi",
            Self::Ls => "ls",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Al => "al",
        }
    }
}

/// The kind of operand accepted at one position of an instruction form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    /// A register.
    Register,
    /// A register or an immediate.
    Source,
    /// An immediate.
    Immediate,
    /// A code label.
    Target,
    /// A `[base, offset]` memory reference.
    Memory,
    /// A memory reference or an `=symbol` literal.
    Load,
}

impl OperandKind {
    /// Returns whether `operand` (before resolution) fits this slot.
    pub const fn accepts(self, operand: &Operand) -> bool {
        match self {
            Self::Register => matches!(operand, Operand::Register(_)),
            Self::Source => matches!(operand, Operand::Register(_) | Operand::Immediate(_)),
            Self::Immediate => matches!(operand, Operand::Immediate(_)),
            Self::Target => matches!(operand, Operand::Label(_) | Operand::Target(_)),
            Self::Memory => matches!(operand, Operand::Memory { .. }),
            Self::Load => matches!(operand, Operand::Memory { .. } | Operand::Address(_)),
        }
    }

    /// Human-readable description for diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Register => "a register",
            Self::Source => "a register or immediate",
            Self::Immediate => "an immediate",
            Self::Target => "a label",
            Self::Memory => "a memory reference",
            Self::Load => "a memory reference or =symbol",
        }
    }
}

/// Instruction category, used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Register/immediate moves.
    Move,
    /// Loads and stores.
    Memory,
    /// Arithmetic, logic and shifts.
    Alu,
    /// Flag-only comparisons.
    Compare,
    /// Control flow.
    Branch,
    /// Supervisor calls, halt and nop.
    System,
}

/// Every operation the simulator implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// `mov rd, src`
    Mov,
    /// `mvn rd, src` (bitwise not)
    Mvn,
    /// `ldr rd, [mem]` or `ldr rd, =symbol`
    Ldr,
    /// `ldrb rd, [mem]`
    Ldrb,
    /// `str rs, [mem]`
    Str,
    /// `strb rs, [mem]`
    Strb,
    /// `add rd, rn, src`
    Add,
    /// `adds rd, rn, src` (sets flags)
    Adds,
    /// `sub rd, rn, src`
    Sub,
    /// `subs rd, rn, src` (sets flags)
    Subs,
    /// `mul rd, rn, src`
    Mul,
    /// `sdiv rd, rn, src`
    Sdiv,
    /// `udiv rd, rn, src`
    Udiv,
    /// `neg rd, src`
    Neg,
    /// `and rd, rn, src`
    And,
    /// `ands rd, rn, src` (sets flags)
    Ands,
    /// `orr rd, rn, src`
    Orr,
    /// `eor rd, rn, src`
    Eor,
    /// `lsl rd, rn, src`
    Lsl,
    /// `lsr rd, rn, src`
    Lsr,
    /// `asr rd, rn, src`
    Asr,
    /// `cmp rn, src`
    Cmp,
    /// `cmn rn, src`
    Cmn,
    /// `tst rn, src`
    Tst,
    /// `b label`
    B,
    /// `b.cond label` / `bcond label`
    BCond(Condition),
    /// `bl label`
    Bl,
    /// `br rn`
    Br,
    /// `blr rn`
    Blr,
    /// `ret [rn]`
    Ret,
    /// `cbz rn, label`
    Cbz,
    /// `cbnz rn, label`
    Cbnz,
    /// `svc #imm`
    Svc,
    /// `halt` / `hlt [#imm]`
    Halt,
    /// `nop`
    Nop,
}

use OperandKind::{
    Immediate as I, Load as L, Memory as M, Register as R, Source as S, Target as T,
};

const FORM_NONE: &[&[OperandKind]] = &[&[]];
const FORM_R_S: &[&[OperandKind]] = &[&[R, S]];
const FORM_R_R_S: &[&[OperandKind]] = &[&[R, R, S]];
const FORM_R_M: &[&[OperandKind]] = &[&[R, M]];
const FORM_R_L: &[&[OperandKind]] = &[&[R, L]];
const FORM_R_T: &[&[OperandKind]] = &[&[R, T]];
const FORM_T: &[&[OperandKind]] = &[&[T]];
const FORM_R: &[&[OperandKind]] = &[&[R]];
const FORM_I: &[&[OperandKind]] = &[&[I]];
const FORM_OPT_R: &[&[OperandKind]] = &[&[], &[R]];
const FORM_OPT_I: &[&[OperandKind]] = &[&[], &[I]];

impl Mnemonic {
    /// Parses a mnemonic case-insensitively.
    ///
    /// Conditional branches are accepted both as `b.lt` and `blt`.
    pub fn parse(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        let simple = match lower.as_str() {
            "mov" => Self::Mov,
            "mvn" => Self::Mvn,
            "ldr" => Self::Ldr,
            "ldrb" => Self::Ldrb,
            "str" => Self::Str,
            "strb" => Self::Strb,
            "add" => Self::Add,
            "adds" => Self::Adds,
            "sub" => Self::Sub,
            "subs" => Self::Subs,
            "mul" => Self::Mul,
            "sdiv" => Self::Sdiv,
            "udiv" => Self::Udiv,
            "neg" => Self::Neg,
            "and" => Self::And,
            "ands" => Self::Ands,
            "orr" => Self::Orr,
            "eor" => Self::Eor,
            "lsl" => Self::Lsl,
            "lsr" => Self::Lsr,
            "asr" => Self::Asr,
            "cmp" => Self::Cmp,
            "cmn" => Self::Cmn,
            "tst" => Self::Tst,
            "b" => Self::B,
            "bl" => Self::Bl,
            "br" => Self::Br,
            "blr" => Self::Blr,
            "ret" => Self::Ret,
            "cbz" => Self::Cbz,
            "cbnz" => Self::Cbnz,
            "svc" => Self::Svc,
            "halt" | "hlt" => Self::Halt,
            "nop" => Self::Nop,
            _ => {
                let suffix = lower
                    .strip_prefix("b.")
                    .or_else(|| lower.strip_prefix('b'))?;
                return Condition::from_suffix(suffix).map(Self::BCond);
            }
        };
        Some(simple)
    }

    /// The operand forms this mnemonic accepts, as lists of operand kinds.
    pub const fn forms(self) -> &'static [&'static [OperandKind]] {
        match self {
            Self::Mov | Self::Mvn | Self::Neg | Self::Cmp | Self::Cmn | Self::Tst => FORM_R_S,
            Self::Ldr => FORM_R_L,
            Self::Ldrb | Self::Str | Self::Strb => FORM_R_M,
            Self::Add
            | Self::Adds
            | Self::Sub
            | Self::Subs
            | Self::Mul
            | Self::Sdiv
            | Self::Udiv
            | Self::And
            | Self::Ands
            | Self::Orr
            | Self::Eor
            | Self::Lsl
            | Self::Lsr
            | Self::Asr => FORM_R_R_S,
            Self::B | Self::BCond(_) | Self::Bl => FORM_T,
            Self::Cbz | Self::Cbnz => FORM_R_T,
            Self::Br | Self::Blr => FORM_R,
            Self::Ret => FORM_OPT_R,
            Self::Svc => FORM_I,
            Self::Halt => FORM_OPT_I,
            Self::Nop => FORM_NONE,
        }
    }

    /// Statistics category.
    pub const fn category(self) -> Category {
        match self {
            Self::Mov | Self::Mvn => Category::Move,
            Self::Ldr | Self::Ldrb | Self::Str | Self::Strb => Category::Memory,
            Self::Add
            | Self::Adds
            | Self::Sub
            | Self::Subs
            | Self::Mul
            | Self::Sdiv
            | Self::Udiv
            | Self::Neg
            | Self::And
            | Self::Ands
            | Self::Orr
            | Self::Eor
            | Self::Lsl
            | Self::Lsr
            | Self::Asr => Category::Alu,
            Self::Cmp | Self::Cmn | Self::Tst => Category::Compare,
            Self::B
            | Self::BCond(_)
            | Self::Bl
            | Self::Br
            | Self::Blr
            | Self::Ret
            | Self::Cbz
            | Self::Cbnz => Category::Branch,
            Self::Svc | Self::Halt | Self::Nop => Category::System,
        }
    }

    /// Lowercase keyword (without condition suffix for `b.cond`).
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Mvn => "mvn",
            Self::Ldr => "ldr",
            Self::Ldrb => "ldrb",
            Self::Str => "str",
            Self::Strb => "strb",
            Self::Add => "add",
            Self::Adds => "adds",
            Self::Sub => "sub",
            Self::Subs => "subs",
            Self::Mul => "mul",
            Self::Sdiv => "sdiv",
            Self::Udiv => "udiv",
            Self::Neg => "neg",
            Self::And => "and",
            Self::Ands => "ands",
            Self::Orr => "orr",
            Self::Eor => "eor",
            Self::Lsl => "lsl",
            Self::Lsr => "lsr",
            Self::Asr => "asr",
            Self::Cmp => "cmp",
            Self::Cmn => "cmn",
            Self::Tst => "tst",
            Self::B | Self::BCond(_) => "b",
            Self::Bl => "bl",
            Self::Br => "br",
            Self::Blr => "blr",
            Self::Ret => "ret",
            Self::Cbz => "cbz",
            Self::Cbnz => "cbnz",
            Self::Svc => "svc",
            Self::Halt => "halt",
            Self::Nop => "nop",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BCond(cond) => write!(f, "b.{}", cond.suffix()),
            other => f.write_str(other.keyword()),
        }
    }
}
