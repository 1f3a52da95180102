//! Core processor implementation.
//!
//! This module contains the machine state and the execution engine:
//! architectural register components, the CPU step loop, and the
//! functional units (ALU and branch condition evaluation) it dispatches to.

/// Architecture components (general-purpose registers, NZCV flags).
pub mod arch;

/// CPU state, fetch/execute step, memory access and syscalls.
pub mod cpu;

/// Execution units (ALU, branch condition unit).
pub mod units;

pub use self::cpu::Cpu;
