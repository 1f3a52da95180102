//! Assembler: source text to [`Program`].
//!
//! Assembly runs in three stages:
//! 1. **Parse:** Each line is lexed and parsed into records (labels, instructions,
//!    directives, assignments). The first malformed line aborts with a [`ParseError`].
//! 2. **Layout:** Records are walked in order to build the instruction vector,
//!    the data image and the symbol table.
//! 3. **Resolve:** Label and `=symbol` operands are bound to instruction indices
//!    and values; the entry point is selected.
//!
//! [`ParseError`]: crate::common::error::ParseError

/// Directive and constant-expression parsing.
mod directive;
/// Comment stripping, tokenizing and operand classification.
mod lexer;
/// Line parser producing records.
mod parser;
/// Layout and label resolution.
mod symbols;

use tracing::debug;

use crate::common::error::AsmError;
use crate::config::Config;
use crate::isa::program::Program;

/// Assembles a sequence of source lines into a resolved [`Program`].
///
/// Line numbers in errors are 1-based positions in `lines`.
///
/// # Errors
///
/// Returns [`AsmError::Parse`] for the first malformed line, or
/// [`AsmError::Resolution`] when a label reference cannot be bound.
pub fn assemble<I>(lines: I, config: &Config) -> Result<Program, AsmError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut records = Vec::new();
    let mut line_count = 0;
    for (idx, line) in lines.into_iter().enumerate() {
        records.extend(parser::parse_line(line.as_ref(), idx + 1)?);
        line_count = idx + 1;
    }
    debug!(lines = line_count, records = records.len(), "source parsed");

    let layout = symbols::layout(&records, config.memory.data_base)?;
    Ok(symbols::resolve(layout, &config.general.entry_symbol)?)
}

/// Assembles a complete source text. See [`assemble`].
///
/// # Errors
///
/// Same as [`assemble`].
pub fn assemble_str(source: &str, config: &Config) -> Result<Program, AsmError> {
    assemble(source.lines(), config)
}
