//! 64-bit ARM-style assembly simulator library.
//!
//! This crate assembles and executes programs written in a subset of AArch64
//! assembly. It provides the following:
//! 1. **Assembler:** Line parsing, directives, data layout and label resolution.
//! 2. **ISA:** The closed instruction set, operand model and resolved `Program`.
//! 3. **Core:** Register file, NZCV flags, ALU, branch conditions and the step loop.
//! 4. **Memory:** Flat little-endian data memory with a downward-growing stack.
//! 5. **Simulation:** The `Simulator` session, configuration and statistics.
//!
//! ```
//! use armsim_core::{Config, ExecutionResult, Simulator};
//!
//! let mut sim = Simulator::new(Config::default());
//! sim.parse(["mov x0, 5", "add x0, x0, x0", "halt"]).unwrap();
//! assert!(matches!(sim.run(), ExecutionResult::Halted { .. }));
//! assert_eq!(sim.reg("x0"), Ok(10));
//! ```

/// Assembler (lexer, parser, directives, symbol resolution).
pub mod asm;
/// Common types and constants (errors, register file, syntax characters).
pub mod common;
/// Simulator configuration (defaults and JSON-loadable structures).
pub mod config;
/// CPU core (architecture state, execution, functional units).
pub mod core;
/// Instruction set (mnemonics, operands, programs, disassembly, ABI).
pub mod isa;
/// Simulation session and source loading.
pub mod sim;
/// Memory subsystem.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Machine state for one run; holds registers, memory and console.
pub use crate::core::Cpu;
/// Resolved program produced by the assembler.
pub use crate::isa::program::Program;
/// Simulation session; construct with `Simulator::new`.
pub use crate::sim::{EngineState, ExecutionResult, Simulator};
