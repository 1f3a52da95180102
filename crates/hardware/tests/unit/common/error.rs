//! # Error Display Tests
//!
//! Messages carry the source line and the offending text.

use armsim_core::common::{
    AsmError, ExecutionError, ParseError, ParseErrorKind, RegisterError, ResolutionError,
};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_error_display() {
    let err = ParseError::new(4, ParseErrorKind::UnknownMnemonic("frob".into()));
    assert_eq!(err.to_string(), "line 4: unknown mnemonic `frob`");
}

#[test]
fn test_operand_errors_display() {
    let count = ParseErrorKind::OperandCountMismatch {
        mnemonic: "add".into(),
        expected: "3".into(),
        found: 2,
    };
    assert_eq!(count.to_string(), "`add` expects 3 operand(s), found 2");

    let kind = ParseErrorKind::OperandKindMismatch {
        mnemonic: "b".into(),
        index: 1,
        expected: "a label",
        found: "x0".into(),
    };
    assert_eq!(kind.to_string(), "operand 1 of `b` must be a label, found `x0`");
}

#[test]
fn test_asm_error_line() {
    let parse: AsmError = ParseError::new(7, ParseErrorKind::DuplicateLabel("a".into())).into();
    assert_eq!(parse.line(), 7);
    assert_eq!(parse.to_string(), "line 7: label `a` is already defined");

    let resolution: AsmError = ResolutionError::UndefinedLabel {
        name: "nowhere".into(),
        line: 3,
    }
    .into();
    assert_eq!(resolution.line(), 3);
    assert_eq!(resolution.to_string(), "line 3: undefined label `nowhere`");

    let not_code: AsmError = ResolutionError::NotCodeLabel {
        name: "msg".into(),
        line: 9,
    }
    .into();
    assert_eq!(not_code.line(), 9);
}

#[test]
fn test_execution_error_display() {
    assert_eq!(
        ExecutionError::MemoryFault {
            line: 2,
            address: 0x10,
            size: 8
        }
        .to_string(),
        "line 2: memory fault accessing 8 byte(s) at 0x10"
    );
    assert_eq!(
        ExecutionError::StepLimitExceeded { limit: 100 }.to_string(),
        "step limit of 100 instructions exceeded"
    );
    assert_eq!(
        ExecutionError::InvalidProgramCounter { pc: 9, len: 2 }.to_string(),
        "invalid program counter 9 (program has 2 instructions)"
    );
    assert_eq!(ExecutionError::NoProgramLoaded.to_string(), "no program loaded");
}

#[test]
fn test_register_error_display() {
    assert_eq!(
        RegisterError::UnknownRegister("q0".into()).to_string(),
        "unknown register `q0`"
    );
}
