//! Statement translation.
//!
//! Each source line is one statement, split on whitespace. Variables live in
//! registers starting at `x10`; `x9` is scratch for three-operand assignments.
//! String literals are collected into the data section as `sN` with a
//! companion `sN_len` length symbol.

use tracing::debug;

use crate::emitter::Emitter;
use crate::error::{CompileError, CompileErrorKind};

/// First register assigned to a variable.
pub const VARIABLE_BASE_REGISTER: usize = 10;

/// Last register available for variables; `x29`/`x30` are the frame and link registers.
pub const VARIABLE_LAST_REGISTER: usize = 28;

/// Scratch register for `a op b` evaluation.
const SCRATCH: &str = "x9";

/// Prefix of generated string symbols.
const STRING_PREFIX: &str = "s";

/// Linux `write` and `exit` syscall numbers.
const SYS_WRITE: &str = "0x40";
const SYS_EXIT: &str = "#93";

/// Whether translation continues after a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep translating.
    Continue,
    /// `exit` was emitted; remaining lines are ignored.
    Stop,
}

/// Translates toy-language statements into assembly.
#[derive(Clone, Debug)]
pub struct Compiler {
    code: Emitter,
    strings: Vec<String>,
    variables: Vec<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_number(text: &str) -> Option<i64> {
    let (negative, digits) = text
        .strip_prefix('-')
        .map_or((false, text), |rest| (true, rest));
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()?
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Escape characters the assembler accepts after a backslash.
const ESCAPES: [char; 7] = ['n', 't', 'r', '0', '\\', '"', '\''];

/// Strips matching single or double quotes and escapes embedded double quotes.
///
/// Returns `None` for an escape the assembler would reject, including a
/// trailing lone backslash.
fn string_literal(text: &str) -> Option<String> {
    let inner = ['"', '\'']
        .iter()
        .find_map(|&q| text.strip_prefix(q).and_then(|rest| rest.strip_suffix(q)))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => {
                let escaped = chars.next().filter(|c| ESCAPES.contains(c))?;
                out.push('\\');
                out.push(escaped);
            }
            _ => out.push(ch),
        }
    }
    Some(out)
}

impl Compiler {
    /// Creates a compiler and emits the program prologue.
    pub fn new() -> Self {
        let mut code = Emitter::new();
        code.line(".text");
        code.line(".global _start");
        code.line("_start:");
        code.indent();
        Self {
            code,
            strings: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Declared variables, in register order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Register holding `name`, if declared.
    pub fn register_of(&self, name: &str) -> Option<String> {
        self.variables
            .iter()
            .position(|v| v == name)
            .map(|idx| format!("x{}", idx + VARIABLE_BASE_REGISTER))
    }

    /// Turns a variable name or integer literal into an assembly operand.
    fn value(&self, text: &str, line: &str) -> Result<String, CompileErrorKind> {
        let invalid = || CompileErrorKind::InvalidValue {
            value: text.to_string(),
            line: line.to_string(),
        };
        if is_name(text) {
            self.register_of(text).ok_or_else(invalid)
        } else {
            parse_number(text).map(|n| format!("#{n}")).ok_or_else(invalid)
        }
    }

    fn declare(&mut self, name: &str, value: &str, line: &str) -> Result<(), CompileErrorKind> {
        if !is_name(name) || self.variables.iter().any(|v| v == name) {
            return Err(CompileErrorKind::InvalidLet(line.to_string()));
        }
        let index = self.variables.len() + VARIABLE_BASE_REGISTER;
        if index > VARIABLE_LAST_REGISTER {
            return Err(CompileErrorKind::TooManyVariables(name.to_string()));
        }
        let value = self.value(value, line)?;
        self.code.line(format!("mov x{index}, {value}"));
        self.variables.push(name.to_string());
        Ok(())
    }

    fn print(&mut self, literal: &str, newline: bool) -> Result<(), CompileErrorKind> {
        let mut text = string_literal(literal.trim())
            .ok_or_else(|| CompileErrorKind::InvalidLiteral(literal.trim().to_string()))?;
        if newline {
            text.push_str("\\n");
        }
        let symbol = format!("{STRING_PREFIX}{}", self.strings.len());
        self.code.line("mov x0, #1");
        self.code.line(format!("ldr x1, ={symbol}"));
        self.code.line(format!("ldr x2, ={symbol}_len"));
        self.code.line(format!("mov x8, {SYS_WRITE}"));
        self.code.line("svc 0");
        self.strings.push(text);
        Ok(())
    }

    fn assign(&mut self, words: &[&str], line: &str) -> Result<(), CompileErrorKind> {
        let syntax = || CompileErrorKind::InvalidSyntax(line.to_string());
        match words {
            [var, op, value] => {
                let mnemonic = match *op {
                    "=" => "mov",
                    "+=" => "add",
                    "-=" => "sub",
                    "*=" => "mul",
                    _ => return Err(syntax()),
                };
                let var = self.value(var, line)?;
                let value = self.value(value, line)?;
                if mnemonic == "mov" {
                    self.code.line(format!("mov {var}, {value}"));
                } else {
                    self.code.line(format!("{mnemonic} {var}, {var}, {value}"));
                }
            }
            [var, "=", lhs, op, rhs] => {
                let mnemonic = match *op {
                    "+" => "add",
                    "-" => "sub",
                    "*" => "mul",
                    _ => return Err(syntax()),
                };
                let var = self.value(var, line)?;
                let mut lhs = self.value(lhs, line)?;
                let rhs = self.value(rhs, line)?;
                if lhs.starts_with('#') {
                    self.code.line(format!("mov {SCRATCH}, {lhs}"));
                    lhs = SCRATCH.to_string();
                }
                self.code.line(format!("{mnemonic} {SCRATCH}, {lhs}, {rhs}"));
                self.code.line(format!("mov {var}, {SCRATCH}"));
            }
            _ => return Err(syntax()),
        }
        Ok(())
    }

    /// Translates one source line.
    pub fn statement(&mut self, line: &str, number: usize) -> Result<Control, CompileError> {
        self.translate(line)
            .map_err(|kind| CompileError::new(number, kind))
    }

    fn translate(&mut self, line: &str) -> Result<Control, CompileErrorKind> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&keyword) = words.first() else {
            return Ok(Control::Continue);
        };
        let argument = line.trim_start()[keyword.len()..].trim();

        match keyword {
            "let" => match words.as_slice() {
                [_, name, "=", value, ..] => self.declare(name, value, line)?,
                _ => return Err(CompileErrorKind::InvalidLet(line.to_string())),
            },
            "label" | "goto" => {
                let Some(name) = words.get(1).filter(|name| is_name(name)) else {
                    return Err(CompileErrorKind::MissingName {
                        keyword: if keyword == "label" { "label" } else { "goto" },
                        line: line.to_string(),
                    });
                };
                if keyword == "label" {
                    self.code.dedent();
                    self.code.line(format!(".{name}:"));
                    self.code.indent();
                } else {
                    self.code.line(format!("b .{name}"));
                }
            }
            "print" => self.print(argument, false)?,
            "println" => self.print(argument, true)?,
            "exit" => {
                if let Some(value) = words.get(1) {
                    let value = self.value(value, line)?;
                    self.code.line(format!("mov x0, {value}"));
                }
                self.code.line(format!("mov x8, {SYS_EXIT}"));
                self.code.line("svc 0");
                return Ok(Control::Stop);
            }
            name if self.register_of(name).is_some() => self.assign(&words, line)?,
            _ => return Err(CompileErrorKind::UnexpectedOperation(line.to_string())),
        }
        Ok(Control::Continue)
    }

    /// Emits the data section and returns the complete assembly text.
    pub fn finish(mut self) -> String {
        self.code.dedent();
        let mut out = self.code.into_contents();
        let mut data = Emitter::new();
        data.line(".data");
        for (idx, text) in self.strings.iter().enumerate() {
            data.line(format!("{STRING_PREFIX}{idx}: .ascii \"{text}\""));
            data.line(format!("{STRING_PREFIX}{idx}_len = .-{STRING_PREFIX}{idx}"));
        }
        out.push_str(data.contents());
        debug!(
            variables = self.variables.len(),
            strings = self.strings.len(),
            "assembly generated"
        );
        out
    }
}
