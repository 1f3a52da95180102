//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Register Constants:** Register counts and the register-prefix characters.
//! 2. **Memory Constants:** Default data-memory placement and stack alignment.
//! 3. **Assembly Constants:** Comment delimiters and the default entry symbol.

/// Number of addressable general-purpose registers (`x0`-`x30`).
pub const GPR_COUNT: usize = 31;

/// Mask applied to register-sourced shift amounts (0-63).
pub const SHIFT_MASK: u64 = 0x3F;

/// Default base address of the data memory (64 KiB).
pub const DATA_BASE: u64 = 0x0001_0000;

/// Default amount of free data memory placed after the assembled data image.
pub const DATA_MEMORY_SIZE: usize = 64 * 1024;

/// Largest data image the assembler will lay out (16 MiB).
pub const MAX_DATA_IMAGE: usize = 16 * 1024 * 1024;

/// Largest amount of free data memory a configuration may request (256 MiB).
pub const MAX_MEMORY_SIZE: usize = 256 * 1024 * 1024;

/// Stack pointer alignment in bytes.
pub const STACK_ALIGN: u64 = 16;

/// Symbol used as the program entry point when it names a code label.
pub const ENTRY_SYMBOL: &str = "_start";

/// Line comment delimiters recognised anywhere outside string literals.
pub const LINE_COMMENTS: [&str; 2] = ["//", ";"];

/// Comment character recognised only as the first non-blank character of a line.
pub const LEADING_COMMENT: char = '#';

/// Prefix marking an immediate operand (`#42`).
pub const IMMEDIATE_PREFIX: char = '#';

/// Prefix marking a literal-pool address operand (`=msg`).
pub const ADDRESS_PREFIX: char = '=';

/// Suffix terminating a label definition (`loop:`).
pub const LABEL_SUFFIX: char = ':';
