//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by the assembler and the
//! execution engine. It includes:
//! 1. **Constants:** Register counts, memory defaults, and assembly syntax characters.
//! 2. **Error Handling:** Parse, resolution, register, and execution error types.
//! 3. **Register Management:** The named register file read by callers after a run.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for assembly and execution.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{
    AsmError, ExecutionError, ParseError, ParseErrorKind, RegisterError, ResolutionError,
};
pub use reg::RegisterFile;
