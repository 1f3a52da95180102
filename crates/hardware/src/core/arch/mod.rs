//! Architectural state components.
//!
//! This module contains the programmer-visible processor state:
//! 1. **GPRs:** The 31 general-purpose integer registers.
//! 2. **Flags:** The NZCV condition flags.

/// NZCV condition flags.
pub mod flags;

/// General-Purpose Register file implementation.
pub mod gpr;
