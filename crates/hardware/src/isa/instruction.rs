//! Instruction and operand representation.
//!
//! Operands are classified once, while parsing, into the closed [`Operand`] enum.
//! The execution engine dispatches on these variants and never looks at source text.

use crate::common::constants::GPR_COUNT;
use crate::isa::abi::{REG_FP, REG_LR};
use crate::isa::mnemonic::Mnemonic;

/// A register reference as it appears in an operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    /// General-purpose register `x0`-`x30`.
    X(u8),
    /// Stack pointer.
    Sp,
    /// Zero register `xzr`: reads as zero, writes are discarded.
    Zero,
}

impl Reg {
    /// Link register alias (`lr`, `x30`).
    pub const LR: Self = Self::X(REG_LR as u8);
    /// Frame pointer alias (`fp`, `x29`).
    pub const FP: Self = Self::X(REG_FP as u8);

    /// Looks up a register by name, case-insensitively.
    ///
    /// Accepts `x0`-`x30`, `sp`, `xzr`, `lr` and `fp`. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "sp" => Some(Self::Sp),
            "xzr" => Some(Self::Zero),
            "lr" => Some(Self::LR),
            "fp" => Some(Self::FP),
            _ => {
                let digits = lower.strip_prefix('x')?;
                if digits.is_empty()
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                    || (digits.len() > 1 && digits.starts_with('0'))
                {
                    return None;
                }
                let idx: usize = digits.parse().ok()?;
                (idx < GPR_COUNT).then_some(Self::X(idx as u8))
            }
        }
    }

    /// Returns the general-purpose register index, if this is one.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::X(idx) => Some(idx as usize),
            Self::Sp | Self::Zero => None,
        }
    }
}

/// The offset part of a `[base, offset]` memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offset {
    /// Constant byte offset.
    Immediate(i64),
    /// Byte offset taken from a register.
    Register(Reg),
}

/// An instruction argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// A register reference.
    Register(Reg),
    /// A 64-bit immediate (two's-complement bit pattern).
    Immediate(i64),
    /// An unresolved label reference. Never present in a resolved program.
    Label(String),
    /// A resolved branch target (instruction index).
    Target(usize),
    /// A memory reference `[base]`, `[base, #imm]` or `[base, xM]`.
    Memory {
        /// Base address register.
        base: Reg,
        /// Offset added to the base.
        offset: Offset,
    },
    /// An unresolved `=symbol` literal. Resolved to an `Immediate` holding the symbol value.
    Address(String),
}

/// A single parsed instruction.
///
/// Immutable once built: the resolver produces new instructions rather than
/// patching existing ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    mnemonic: Mnemonic,
    operands: Vec<Operand>,
    line: usize,
}

impl Instruction {
    /// Creates an instruction.
    ///
    /// # Arguments
    ///
    /// * `mnemonic` - The operation.
    /// * `operands` - Operands in source order.
    /// * `line` - 1-based source line, used for diagnostics.
    pub fn new(mnemonic: Mnemonic, operands: Vec<Operand>, line: usize) -> Self {
        Self {
            mnemonic,
            operands,
            line,
        }
    }

    /// The operation.
    pub const fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    /// Operands in source order.
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// The operand at `idx`, if present.
    pub fn operand(&self, idx: usize) -> Option<&Operand> {
        self.operands.get(idx)
    }

    /// 1-based source line.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns a copy of this instruction with every operand passed through `f`.
    pub(crate) fn try_map_operands<E>(
        &self,
        mut f: impl FnMut(&Operand) -> Result<Operand, E>,
    ) -> Result<Self, E> {
        let operands = self.operands.iter().map(&mut f).collect::<Result<_, _>>()?;
        Ok(Self {
            mnemonic: self.mnemonic,
            operands,
            line: self.line,
        })
    }

    /// True when no `Label` or `Address` operand remains.
    pub fn is_resolved(&self) -> bool {
        self.operands
            .iter()
            .all(|op| !matches!(op, Operand::Label(_) | Operand::Address(_)))
    }
}
