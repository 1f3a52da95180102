//! Assembled program representation.
//!
//! A [`Program`] is the read-only input of the execution engine: a flat,
//! fully resolved instruction vector, the symbol map, the initial data image
//! and the entry index.

use std::collections::HashMap;

use crate::isa::instruction::Instruction;

/// The value bound to a symbol name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A code label: index of the instruction it precedes.
    Code(usize),
    /// A data label: absolute byte address in data memory.
    Data(u64),
    /// A constant from `name = expr`, `.equ` or `.set`.
    Constant(i64),
}

impl Symbol {
    /// The numeric value of the symbol, as loaded by `ldr rd, =symbol`.
    pub const fn value(self) -> i64 {
        match self {
            Self::Code(idx) => idx as i64,
            Self::Data(addr) => addr as i64,
            Self::Constant(v) => v,
        }
    }
}

/// A parsed, resolved program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    symbols: HashMap<String, Symbol>,
    data: Vec<u8>,
    data_base: u64,
    entry: usize,
}

impl Program {
    pub(crate) fn new(
        instructions: Vec<Instruction>,
        symbols: HashMap<String, Symbol>,
        data: Vec<u8>,
        data_base: u64,
        entry: usize,
    ) -> Self {
        Self {
            instructions,
            symbols,
            data,
            data_base,
            entry,
        }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction at `idx`.
    pub fn get(&self, idx: usize) -> Option<&Instruction> {
        self.instructions.get(idx)
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Looks up a symbol by (case-sensitive) name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Instruction index of a code label.
    pub fn label_index(&self, name: &str) -> Option<usize> {
        match self.symbol(name)? {
            Symbol::Code(idx) => Some(idx),
            Symbol::Data(_) | Symbol::Constant(_) => None,
        }
    }

    /// Iterates over all symbols.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, Symbol)> + '_ {
        self.symbols.iter().map(|(name, sym)| (name.as_str(), *sym))
    }

    /// Initial contents of data memory, starting at [`Program::data_base`].
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Address of the first data byte.
    pub const fn data_base(&self) -> u64 {
        self.data_base
    }

    /// Instruction index where execution starts.
    pub const fn entry(&self) -> usize {
        self.entry
    }
}
