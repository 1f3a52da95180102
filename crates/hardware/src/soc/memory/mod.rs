//! System Memory.
//!
//! This module implements the data memory seen by loads, stores and syscalls.

/// Flat byte buffer backing data memory.
pub mod buffer;

pub use self::buffer::DataMemory;
