//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! assembler and the execution engine. It provides:
//! 1. **Defaults:** Baseline constants (data memory placement, entry symbol).
//! 2. **Structures:** `general` (tracing, step guard, entry, division traps) and `memory`.
//! 3. **Loading:** JSON deserialization from a string or file; every field is optional.
//!
//! Use `Config::default()` for the CLI, or supply JSON such as
//! `{"general": {"step_limit": 100000}, "memory": {"size": 4096}}`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::common::constants;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Base address of data memory.
    pub const DATA_BASE: u64 = constants::DATA_BASE;

    /// Free bytes of data memory after the data image (stack space).
    pub const MEMORY_SIZE: usize = constants::DATA_MEMORY_SIZE;

    /// Entry symbol.
    pub const ENTRY_SYMBOL: &str = constants::ENTRY_SYMBOL;
}

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`Config`].
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the simulator cannot honour.
    #[error("invalid config value `{field}`: {reason}")]
    Value {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the memory layout fits the address space and the size limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let MemoryConfig { data_base, size } = self.memory;
        if size > constants::MAX_MEMORY_SIZE {
            return Err(ConfigError::Value {
                field: "memory.size",
                reason: format!(
                    "{size} exceeds the limit of {} bytes",
                    constants::MAX_MEMORY_SIZE
                ),
            });
        }
        let span = (size + constants::MAX_DATA_IMAGE) as u64;
        if data_base.checked_add(span).is_none() {
            return Err(ConfigError::Value {
                field: "memory.data_base",
                reason: format!("{data_base:#x} leaves no room for {span} bytes of memory"),
            });
        }
        Ok(())
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Fault the run after this many executed instructions. A diagnostic safety
    /// net for tests; `None` (the default) never limits execution.
    #[serde(default)]
    pub step_limit: Option<u64>,

    /// Code label where execution starts; falls back to instruction 0 when absent.
    #[serde(default = "GeneralConfig::default_entry_symbol")]
    pub entry_symbol: String,

    /// Fault with an arithmetic error on division by zero instead of producing 0.
    #[serde(default)]
    pub trap_divide_by_zero: bool,
}

impl GeneralConfig {
    /// Returns the default entry symbol.
    fn default_entry_symbol() -> String {
        defaults::ENTRY_SYMBOL.to_string()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            step_limit: None,
            entry_symbol: Self::default_entry_symbol(),
            trap_divide_by_zero: false,
        }
    }
}

/// Data memory layout.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Address of the first data byte.
    #[serde(default = "MemoryConfig::default_data_base")]
    pub data_base: u64,

    /// Free bytes placed after the data image; the stack grows down from the top.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    /// Returns the default data base address.
    fn default_data_base() -> u64 {
        defaults::DATA_BASE
    }

    /// Returns the default free memory size.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_base: defaults::DATA_BASE,
            size: defaults::MEMORY_SIZE,
        }
    }
}
