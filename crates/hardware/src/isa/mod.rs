//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction model shared by the assembler and the executor.
//!
//! # Contents
//!
//! * `mnemonic`: The closed operation set, operand forms and condition codes.
//! * `instruction`: Registers, operands and instructions.
//! * `program`: The resolved program and its symbols.
//! * `abi`: Register roles and syscall numbers.
//! * `disasm`: Text rendering for tracing.

/// Register roles and syscall numbers.
pub mod abi;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Registers, operands and instructions.
pub mod instruction;

/// The closed mnemonic set and its operand forms.
pub mod mnemonic;

/// Resolved programs and symbols.
pub mod program;

pub use instruction::{Instruction, Offset, Operand, Reg};
pub use mnemonic::{Category, Condition, Mnemonic, OperandKind};
pub use program::{Program, Symbol};
