//! System Components.
//!
//! The parts of the simulated machine outside the core. There is no device
//! model: the only component is data memory.

/// Data memory.
pub mod memory;

pub use memory::DataMemory;
