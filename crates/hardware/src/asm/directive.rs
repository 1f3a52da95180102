//! Assembler directives and constant expressions.
//!
//! Directives select the output section, emit data bytes and define
//! constants. Expressions are sums and differences of integers, symbols and
//! the location counter `.`; symbols must be defined before use.

use crate::asm::lexer::{is_identifier, parse_immediate, split_operands};
use crate::common::error::ParseErrorKind;

/// Output section selected by `.text` / `.data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Section {
    /// Instructions.
    Text,
    /// Initialised data (also `.bss` and `.rodata`).
    Data,
}

/// One operand of a constant expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Term {
    Number(i64),
    Here,
    Symbol(String),
}

/// A signed sum of terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Expr {
    terms: Vec<(bool, Term)>,
}

impl Expr {
    /// Parses `a + b - c`. Returns the reason text on failure.
    pub(crate) fn parse(text: &str) -> Result<Self, String> {
        let mut terms = Vec::new();
        let mut negative = false;
        let mut current = String::new();
        for ch in text.chars() {
            if matches!(ch, '+' | '-') && !current.trim().is_empty() {
                terms.push((negative, Self::term(&current)?));
                current.clear();
                negative = ch == '-';
            } else if matches!(ch, '+' | '-') {
                if ch == '-' {
                    negative = !negative;
                }
            } else {
                current.push(ch);
            }
        }
        if current.trim().is_empty() {
            return Err(format!("incomplete expression `{}`", text.trim()));
        }
        terms.push((negative, Self::term(&current)?));
        Ok(Self { terms })
    }

    fn term(text: &str) -> Result<Term, String> {
        let text = text.trim();
        if text == "." {
            Ok(Term::Here)
        } else if let Some(value) = parse_immediate(text) {
            Ok(Term::Number(value))
        } else if is_identifier(text) {
            Ok(Term::Symbol(text.to_string()))
        } else {
            Err(format!("invalid term `{text}`"))
        }
    }

    /// Evaluates the expression with wrapping arithmetic.
    ///
    /// `lookup` returns the value of a defined symbol; `here` is the current
    /// location counter.
    pub(crate) fn evaluate(
        &self,
        here: i64,
        lookup: impl Fn(&str) -> Option<i64>,
    ) -> Result<i64, ParseErrorKind> {
        self.terms.iter().try_fold(0i64, |acc, (negative, term)| {
            let value = match term {
                Term::Number(v) => *v,
                Term::Here => here,
                Term::Symbol(name) => {
                    lookup(name).ok_or_else(|| ParseErrorKind::UndefinedSymbol(name.clone()))?
                }
            };
            Ok(if *negative {
                acc.wrapping_sub(value)
            } else {
                acc.wrapping_add(value)
            })
        })
    }
}

/// A parsed directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Directive {
    /// Switch the output section.
    Section(Section),
    /// Export a symbol. Recorded but otherwise without effect.
    Global(String),
    /// Raw bytes from string literals.
    Bytes(Vec<u8>),
    /// Little-endian integers of `width` bytes each.
    Values { width: usize, values: Vec<Expr> },
    /// Zero-filled (or `fill`-filled) space.
    Skip { size: Expr, fill: u8 },
    /// Pad the data section to a multiple of `alignment` bytes.
    Align(u64),
    /// `.equ name, expr` / `.set name, expr`.
    Equ { name: String, expr: Expr },
}

fn malformed(directive: &str, reason: impl Into<String>) -> ParseErrorKind {
    ParseErrorKind::MalformedDirective {
        directive: directive.to_string(),
        reason: reason.into(),
    }
}

/// Decodes a double-quoted string literal with C-style escapes.
fn parse_string(text: &str) -> Result<Vec<u8>, String> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| format!("expected a quoted string, found `{text}`"))?;

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => b'\n',
            Some('t') => b'\t',
            Some('r') => b'\r',
            Some('0') => 0,
            Some('\\') => b'\\',
            Some('"') => b'"',
            Some('\'') => b'\'',
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("dangling `\\` at end of string".to_string()),
        };
        bytes.push(escaped);
    }
    Ok(bytes)
}

fn strings(name: &str, args: &[&str], terminate: bool) -> Result<Directive, ParseErrorKind> {
    if args.is_empty() {
        return Err(malformed(name, "expected at least one string"));
    }
    let mut bytes = Vec::new();
    for arg in args {
        bytes.extend(parse_string(arg).map_err(|reason| malformed(name, reason))?);
        if terminate {
            bytes.push(0);
        }
    }
    Ok(Directive::Bytes(bytes))
}

fn values(name: &str, args: &[&str], width: usize) -> Result<Directive, ParseErrorKind> {
    if args.is_empty() {
        return Err(malformed(name, "expected at least one value"));
    }
    let values = args
        .iter()
        .map(|arg| Expr::parse(arg).map_err(|reason| malformed(name, reason)))
        .collect::<Result<_, _>>()?;
    Ok(Directive::Values { width, values })
}

fn single_symbol<'a>(name: &str, args: &[&'a str]) -> Result<&'a str, ParseErrorKind> {
    match args {
        [symbol] if is_identifier(symbol) => Ok(symbol),
        _ => Err(malformed(name, "expected a single symbol name")),
    }
}

/// Parses a directive line. `name` includes the leading `.`.
pub(crate) fn parse(name: &str, rest: &str) -> Result<Directive, ParseErrorKind> {
    let lower = name.to_ascii_lowercase();
    let args = split_operands(rest);

    let directive = match lower.as_str() {
        ".text" => Directive::Section(Section::Text),
        ".data" | ".bss" | ".rodata" => Directive::Section(Section::Data),
        ".section" => match single_symbol(name, &args)?.to_ascii_lowercase().as_str() {
            ".text" => Directive::Section(Section::Text),
            ".data" | ".bss" | ".rodata" => Directive::Section(Section::Data),
            other => return Err(malformed(name, format!("unsupported section `{other}`"))),
        },
        ".global" | ".globl" => Directive::Global(single_symbol(name, &args)?.to_string()),
        ".ascii" => strings(name, &args, false)?,
        ".asciz" | ".string" => strings(name, &args, true)?,
        ".byte" => values(name, &args, 1)?,
        ".hword" | ".short" => values(name, &args, 2)?,
        ".word" | ".long" => values(name, &args, 4)?,
        ".quad" | ".dword" | ".xword" => values(name, &args, 8)?,
        ".skip" | ".space" | ".zero" => {
            let (size, fill) = match args.as_slice() {
                [size] => (*size, 0),
                [size, fill] => {
                    let fill = parse_immediate(fill)
                        .ok_or_else(|| malformed(name, format!("invalid fill byte `{fill}`")))?;
                    (*size, fill as u8)
                }
                _ => return Err(malformed(name, "expected a size and optional fill byte")),
            };
            let size = Expr::parse(size).map_err(|reason| malformed(name, reason))?;
            Directive::Skip { size, fill }
        }
        ".align" | ".p2align" | ".balign" => {
            let [amount] = args.as_slice() else {
                return Err(malformed(name, "expected a single alignment"));
            };
            let amount = parse_immediate(amount)
                .filter(|v| (0..=4096).contains(v))
                .ok_or_else(|| malformed(name, format!("invalid alignment `{amount}`")))?
                as u64;
            let alignment = if lower == ".balign" {
                if !amount.is_power_of_two() {
                    return Err(malformed(name, "alignment must be a power of two"));
                }
                amount
            } else {
                if amount > 12 {
                    return Err(malformed(name, "alignment exponent must be at most 12"));
                }
                1 << amount
            };
            Directive::Align(alignment)
        }
        ".equ" | ".set" => {
            let [symbol, expr] = args.as_slice() else {
                return Err(malformed(name, "expected `name, expression`"));
            };
            if !is_identifier(symbol) {
                return Err(malformed(name, format!("invalid symbol name `{symbol}`")));
            }
            Directive::Equ {
                name: (*symbol).to_string(),
                expr: Expr::parse(expr).map_err(|reason| malformed(name, reason))?,
            }
        }
        _ => return Err(ParseErrorKind::UnknownDirective(name.to_string())),
    };
    Ok(directive)
}

impl Directive {
    /// True for directives that emit bytes and therefore need a data section.
    pub(crate) const fn emits_data(&self) -> bool {
        matches!(self, Self::Bytes(_) | Self::Values { .. } | Self::Skip { .. })
    }
}
