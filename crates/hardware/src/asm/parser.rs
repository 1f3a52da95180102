//! Source line parser.
//!
//! Turns one line of source into zero or more [`Record`]s: label definitions,
//! an instruction, a directive or a symbol assignment. Instructions are
//! checked against the operand forms of their mnemonic so later stages can
//! rely on operand shapes.

use crate::asm::directive::{self, Directive, Expr};
use crate::asm::lexer::{
    parse_operand, split_assignment, split_label, split_operands, strip_comment,
};
use crate::common::error::{ParseError, ParseErrorKind};
use crate::isa::instruction::{Instruction, Operand};
use crate::isa::mnemonic::Mnemonic;

/// What a source line contributes to the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Statement {
    /// `name:`
    Label(String),
    /// An executable instruction.
    Instruction(Instruction),
    /// An assembler directive.
    Directive(Directive),
    /// `name = expr`
    Assign { name: String, expr: Expr },
}

/// A statement tagged with its 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    pub line: usize,
    pub statement: Statement,
}

/// Parses a single source line.
///
/// Blank and comment-only lines produce no records.
pub(crate) fn parse_line(text: &str, line: usize) -> Result<Vec<Record>, ParseError> {
    let err = |kind| ParseError::new(line, kind);
    let mut records = Vec::new();
    let mut rest = strip_comment(text);

    while let Some((name, after)) = split_label(rest) {
        records.push(Record {
            line,
            statement: Statement::Label(name.to_string()),
        });
        rest = after;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(records);
    }

    let statement = if let Some((name, expr)) = split_assignment(rest) {
        let expr = Expr::parse(expr).map_err(|reason| {
            err(ParseErrorKind::MalformedDirective {
                directive: name.to_string(),
                reason,
            })
        })?;
        Statement::Assign {
            name: name.to_string(),
            expr,
        }
    } else {
        let (keyword, operands) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        if keyword.starts_with('.') {
            Statement::Directive(directive::parse(keyword, operands).map_err(err)?)
        } else {
            Statement::Instruction(parse_instruction(keyword, operands, line).map_err(err)?)
        }
    };

    records.push(Record { line, statement });
    Ok(records)
}

fn parse_instruction(
    keyword: &str,
    operands: &str,
    line: usize,
) -> Result<Instruction, ParseErrorKind> {
    let mnemonic = Mnemonic::parse(keyword)
        .ok_or_else(|| ParseErrorKind::UnknownMnemonic(keyword.to_string()))?;
    let texts = split_operands(operands);
    let parsed = texts
        .iter()
        .map(|text| parse_operand(text))
        .collect::<Result<Vec<_>, _>>()?;
    check_form(keyword, mnemonic, &texts, &parsed)?;
    Ok(Instruction::new(mnemonic, parsed, line))
}

/// Verifies that the operands match one of the mnemonic's accepted forms.
fn check_form(
    keyword: &str,
    mnemonic: Mnemonic,
    texts: &[&str],
    operands: &[Operand],
) -> Result<(), ParseErrorKind> {
    let forms = mnemonic.forms();
    let Some(form) = forms.iter().find(|form| form.len() == operands.len()) else {
        let expected = forms
            .iter()
            .map(|form| form.len().to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(ParseErrorKind::OperandCountMismatch {
            mnemonic: keyword.to_string(),
            expected,
            found: operands.len(),
        });
    };

    for (index, (kind, operand)) in form.iter().zip(operands).enumerate() {
        if !kind.accepts(operand) {
            return Err(ParseErrorKind::OperandKindMismatch {
                mnemonic: keyword.to_string(),
                index: index + 1,
                expected: kind.describe(),
                found: texts[index].to_string(),
            });
        }
    }
    Ok(())
}
