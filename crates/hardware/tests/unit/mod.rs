//! # Unit Components
//!
//! Organizes the tests for each part of the simulator: the assembler, the
//! shared types, the core, the ISA model, memory and the simulation driver.

/// Assembler tests: syntax, directives, errors and label resolution.
pub mod asm;



/// Core tests: architectural state, functional units and execution.
pub mod core;


/// Simulator lifecycle and source loading.
pub mod sim;

/// Data memory tests.
pub mod soc;
