//! Symbol table, section layout and label resolution.
//!
//! The layout pass walks records in source order, assigning instruction
//! indices, laying out the data image and binding every label and constant.
//! The resolve pass then rewrites label and `=symbol` operands into concrete
//! targets and immediates, so forward and backward references behave the same.

use std::collections::HashMap;

use tracing::debug;

use crate::asm::directive::{Directive, Section};
use crate::asm::parser::{Record, Statement};
use crate::common::constants::MAX_DATA_IMAGE;
use crate::common::error::{ParseError, ParseErrorKind, ResolutionError};
use crate::isa::instruction::{Instruction, Operand};
use crate::isa::program::{Program, Symbol};

/// Symbols bound during layout.
#[derive(Clone, Debug, Default)]
pub(crate) struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    globals: Vec<String>,
}

impl SymbolTable {
    fn define(&mut self, name: &str, symbol: Symbol, line: usize) -> Result<(), ParseError> {
        if self.symbols.contains_key(name) {
            return Err(ParseError::new(
                line,
                ParseErrorKind::DuplicateLabel(name.to_string()),
            ));
        }
        let _ = self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    fn value(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).map(|sym| sym.value())
    }

    fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }
}

/// Output of the layout pass.
#[derive(Debug)]
pub(crate) struct Layout {
    instructions: Vec<Instruction>,
    table: SymbolTable,
    data: Vec<u8>,
    data_base: u64,
}

struct Builder {
    section: Section,
    layout: Layout,
}

impl Builder {
    fn here(&self) -> i64 {
        match self.section {
            Section::Text => self.layout.instructions.len() as i64,
            Section::Data => self.layout.data_base.wrapping_add(self.layout.data.len() as u64) as i64,
        }
    }

    fn label(&mut self, name: &str, line: usize) -> Result<(), ParseError> {
        let symbol = match self.section {
            Section::Text => Symbol::Code(self.layout.instructions.len()),
            Section::Data => Symbol::Data(self.here() as u64),
        };
        self.layout.table.define(name, symbol, line)
    }

    fn directive(&mut self, directive: &Directive, line: usize) -> Result<(), ParseError> {
        let err = |kind| ParseError::new(line, kind);
        if directive.emits_data() && self.section != Section::Data {
            return Err(err(ParseErrorKind::MalformedDirective {
                directive: "data".to_string(),
                reason: "data directives must appear in the .data section".to_string(),
            }));
        }

        let here = self.here();
        match directive {
            Directive::Section(section) => self.section = *section,
            Directive::Global(name) => self.layout.table.globals.push(name.clone()),
            Directive::Bytes(bytes) => self.layout.data.extend_from_slice(bytes),
            Directive::Values { width, values } => {
                for expr in values {
                    let value = expr
                        .evaluate(here, |name| self.layout.table.value(name))
                        .map_err(err)?;
                    self.layout
                        .data
                        .extend_from_slice(&value.to_le_bytes()[..*width]);
                }
            }
            Directive::Skip { size, fill } => {
                let size = size
                    .evaluate(here, |name| self.layout.table.value(name))
                    .map_err(err)?;
                let len = usize::try_from(size)
                    .ok()
                    .and_then(|size| self.layout.data.len().checked_add(size))
                    .filter(|&len| len <= MAX_DATA_IMAGE)
                    .ok_or_else(|| {
                        err(ParseErrorKind::MalformedDirective {
                            directive: ".skip".to_string(),
                            reason: format!(
                                "invalid size {size} (data image is limited to {MAX_DATA_IMAGE} bytes)"
                            ),
                        })
                    })?;
                self.layout.data.resize(len, *fill);
            }
            Directive::Align(alignment) => {
                if self.section == Section::Data {
                    let align = *alignment as usize;
                    let len = self.layout.data.len().div_ceil(align) * align;
                    self.layout.data.resize(len, 0);
                }
            }
            Directive::Equ { name, expr } => {
                let value = expr
                    .evaluate(here, |sym| self.layout.table.value(sym))
                    .map_err(err)?;
                self.layout.table.define(name, Symbol::Constant(value), line)?;
            }
        }
        Ok(())
    }
}

/// Assigns addresses and indices to every record.
pub(crate) fn layout(records: &[Record], data_base: u64) -> Result<Layout, ParseError> {
    let mut builder = Builder {
        section: Section::Text,
        layout: Layout {
            instructions: Vec::new(),
            table: SymbolTable::default(),
            data: Vec::new(),
            data_base,
        },
    };

    for record in records {
        let line = record.line;
        match &record.statement {
            Statement::Label(name) => builder.label(name, line)?,
            Statement::Instruction(inst) => {
                if builder.section != Section::Text {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::MisplacedInstruction(inst.mnemonic().to_string()),
                    ));
                }
                builder.layout.instructions.push(inst.clone());
            }
            Statement::Directive(directive) => builder.directive(directive, line)?,
            Statement::Assign { name, expr } => {
                let here = builder.here();
                let value = expr
                    .evaluate(here, |sym| builder.layout.table.value(sym))
                    .map_err(|kind| ParseError::new(line, kind))?;
                builder
                    .layout
                    .table
                    .define(name, Symbol::Constant(value), line)?;
            }
        }
    }
    Ok(builder.layout)
}

fn resolve_operand(
    table: &SymbolTable,
    operand: &Operand,
    line: usize,
) -> Result<Operand, ResolutionError> {
    match operand {
        Operand::Label(name) => match table.get(name) {
            Some(Symbol::Code(idx)) => Ok(Operand::Target(idx)),
            Some(Symbol::Data(_) | Symbol::Constant(_)) => Err(ResolutionError::NotCodeLabel {
                name: name.clone(),
                line,
            }),
            None => Err(ResolutionError::UndefinedLabel {
                name: name.clone(),
                line,
            }),
        },
        Operand::Address(name) => table
            .get(name)
            .map(|sym| Operand::Immediate(sym.value()))
            .ok_or_else(|| ResolutionError::UndefinedLabel {
                name: name.clone(),
                line,
            }),
        other => Ok(other.clone()),
    }
}

/// Binds every label reference and selects the entry point.
///
/// The entry is `entry_symbol` when it names a code label, else instruction 0.
pub(crate) fn resolve(layout: Layout, entry_symbol: &str) -> Result<Program, ResolutionError> {
    let Layout {
        instructions,
        table,
        data,
        data_base,
    } = layout;

    let instructions = instructions
        .iter()
        .map(|inst| inst.try_map_operands(|op| resolve_operand(&table, op, inst.line())))
        .collect::<Result<Vec<_>, _>>()?;

    let entry = match table.get(entry_symbol) {
        Some(Symbol::Code(idx)) => idx,
        _ => 0,
    };
    debug!(
        instructions = instructions.len(),
        symbols = table.symbols.len(),
        globals = table.globals.len(),
        data_bytes = data.len(),
        entry,
        "program resolved"
    );

    Ok(Program::new(instructions, table.symbols, data, data_base, entry))
}
