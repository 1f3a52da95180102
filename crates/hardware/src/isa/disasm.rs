//! Instruction Disassembler.
//!
//! Renders parsed instructions back to assembly text for debug tracing,
//! logging, and test diagnostics. Resolved branch targets print as `@index`.
//!
//! # Usage
//!
//! ```
//! use armsim_core::asm::assemble_str;
//! use armsim_core::config::Config;
//! use armsim_core::isa::disasm::disassemble;
//!
//! let program = assemble_str("add x0, x1, #10", &Config::default()).unwrap();
//! assert_eq!(disassemble(&program.instructions()[0]), "add x0, x1, #10");
//! ```

use std::fmt;

use crate::isa::instruction::{Instruction, Offset, Operand, Reg};

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(idx) => write!(f, "x{idx}"),
            Self::Sp => f.write_str("sp"),
            Self::Zero => f.write_str("xzr"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{reg}"),
            Self::Immediate(value) => write!(f, "#{value}"),
            Self::Label(name) => f.write_str(name),
            Self::Target(idx) => write!(f, "@{idx}"),
            Self::Memory { base, offset } => match offset {
                Offset::Immediate(0) => write!(f, "[{base}]"),
                Offset::Immediate(imm) => write!(f, "[{base}, #{imm}]"),
                Offset::Register(reg) => write!(f, "[{base}, {reg}]"),
            },
            Self::Address(name) => write!(f, "={name}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())?;
        for (i, op) in self.operands().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{op}")?;
        }
        Ok(())
    }
}

/// Disassembles an instruction into a human-readable string.
pub fn disassemble(inst: &Instruction) -> String {
    inst.to_string()
}
