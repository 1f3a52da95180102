//! Simulation driver and source loading.
//!
//! Provides the [`Simulator`] session type that owns a program and its
//! machine state, and a helper for reading source files from disk.

pub mod loader;
pub mod simulator;

pub use self::simulator::{EngineState, ExecutionResult, Simulator};
