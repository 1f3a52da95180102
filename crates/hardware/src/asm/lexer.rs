//! Line-level lexical analysis.
//!
//! Splits a raw source line into its parts (comments, label prefixes, the
//! operation keyword and the comma-separated operand list) and classifies
//! operand text into [`Operand`] values.

use crate::common::constants::{
    ADDRESS_PREFIX, IMMEDIATE_PREFIX, LABEL_SUFFIX, LEADING_COMMENT, LINE_COMMENTS,
};
use crate::common::error::ParseErrorKind;
use crate::isa::instruction::{Offset, Operand, Reg};

/// Removes a trailing comment, ignoring delimiters inside string literals.
pub(crate) fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with(LEADING_COMMENT) {
        return "";
    }
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
            continue;
        }
        let rest = &line[idx..];
        if LINE_COMMENTS.iter().any(|delim| rest.starts_with(delim)) {
            return &line[..idx];
        }
    }
    line
}

/// Returns whether `text` is a valid symbol name.
///
/// Names start with a letter, `_`, `.` or `$` and continue with letters,
/// digits, `_`, `.` or `$`. A lone `.` is the location counter, not a name.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    text != "."
        && (first.is_ascii_alphabetic() || matches!(first, '_' | '.' | '$'))
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'))
}

/// Splits a leading `name:` label definition off `text`.
pub(crate) fn split_label(text: &str) -> Option<(&str, &str)> {
    let (name, rest) = text.trim_start().split_once(LABEL_SUFFIX)?;
    is_identifier(name).then_some((name, rest))
}

/// Splits a `name = expr` symbol assignment.
pub(crate) fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let (name, expr) = text.split_once('=')?;
    let name = name.trim();
    is_identifier(name).then_some((name, expr.trim()))
}

/// Splits `text` on commas that are outside brackets and string literals.
///
/// Each part is trimmed. An empty input yields no parts.
pub(crate) fn split_operands(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Parses an integer literal into its 64-bit two's-complement pattern.
///
/// Accepts an optional `#` marker, an optional sign, `0x`/`0b` prefixes and
/// `_` digit separators. Values must fit in 64 bits, signed or unsigned.
pub(crate) fn parse_immediate(text: &str) -> Option<i64> {
    let text = text.strip_prefix(IMMEDIATE_PREFIX).unwrap_or(text).trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let cleaned: String = digits
        .chars()
        .filter(|&c| c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = cleaned.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, cleaned.as_str())
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = u64::from_str_radix(body, radix).ok()?;
    if negative {
        (magnitude <= 1 << 63).then(|| magnitude.wrapping_neg() as i64)
    } else {
        Some(magnitude as i64)
    }
}

fn malformed(text: &str, reason: &'static str) -> ParseErrorKind {
    ParseErrorKind::MalformedOperand {
        operand: text.to_string(),
        reason,
    }
}

/// True for text shaped like a register name the machine does not have (`x31`, `w3`).
fn looks_like_register(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower
        .strip_prefix('x')
        .or_else(|| lower.strip_prefix('w'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_register(text: &str) -> Result<Reg, ParseErrorKind> {
    Reg::from_name(text).ok_or_else(|| {
        if looks_like_register(text) {
            malformed(text, "unknown register")
        } else {
            malformed(text, "expected a register")
        }
    })
}

fn parse_memory(text: &str) -> Result<Operand, ParseErrorKind> {
    let inner = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| malformed(text, "unterminated memory reference"))?;
    let parts = split_operands(inner);
    let (base, offset) = match parts.as_slice() {
        [base] => (parse_register(base)?, Offset::Immediate(0)),
        [base, offset] => {
            let base = parse_register(base)?;
            let offset = if let Some(imm) = parse_immediate(offset) {
                Offset::Immediate(imm)
            } else if let Some(reg) = Reg::from_name(offset) {
                Offset::Register(reg)
            } else {
                return Err(malformed(text, "offset must be an immediate or a register"));
            };
            (base, offset)
        }
        _ => return Err(malformed(text, "expected [base] or [base, offset]")),
    };
    Ok(Operand::Memory { base, offset })
}

/// Classifies operand text by its lexical form.
pub(crate) fn parse_operand(text: &str) -> Result<Operand, ParseErrorKind> {
    let Some(first) = text.chars().next() else {
        return Err(malformed(text, "empty operand"));
    };

    if first == '[' {
        return parse_memory(text);
    }
    if let Some(name) = text.strip_prefix(ADDRESS_PREFIX) {
        let name = name.trim();
        return if is_identifier(name) {
            Ok(Operand::Address(name.to_string()))
        } else {
            Err(malformed(text, "expected a symbol after `=`"))
        };
    }
    if first == IMMEDIATE_PREFIX || first.is_ascii_digit() || first == '-' || first == '+' {
        return parse_immediate(text)
            .map(Operand::Immediate)
            .ok_or_else(|| malformed(text, "invalid or out-of-range integer"));
    }
    if let Some(reg) = Reg::from_name(text) {
        return Ok(Operand::Register(reg));
    }
    if looks_like_register(text) {
        return Err(malformed(text, "unknown register"));
    }
    if is_identifier(text) {
        return Ok(Operand::Label(text.to_string()));
    }
    Err(malformed(text, "unrecognised operand"))
}
