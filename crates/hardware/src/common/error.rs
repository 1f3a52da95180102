//! Assembly and Execution Error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Parse Errors:** Lexical and syntactic failures, tagged with the offending source line.
//! 2. **Resolution Errors:** Label references that cannot be bound to a program location.
//! 3. **Register Errors:** Lookups of register names the register file does not model.
//! 4. **Execution Errors:** Faults raised while running a program; these end a run in the
//!    `Faulted` state and are returned to the caller as values.

use thiserror::Error;

/// The specific reason a source line failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The operation keyword is not part of the instruction set.
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    /// An operand token has no valid lexical interpretation.
    #[error("malformed operand `{operand}`: {reason}")]
    MalformedOperand {
        /// The operand text as written.
        operand: String,
        /// Why the text was rejected.
        reason: &'static str,
    },

    /// No accepted form of the mnemonic takes this many operands.
    #[error("`{mnemonic}` expects {expected} operand(s), found {found}")]
    OperandCountMismatch {
        /// The mnemonic as written.
        mnemonic: String,
        /// Accepted operand counts, e.g. `"2"` or `"0 or 1"`.
        expected: String,
        /// Number of operands supplied.
        found: usize,
    },

    /// An operand has the wrong kind for its position.
    #[error("operand {index} of `{mnemonic}` must be {expected}, found `{found}`")]
    OperandKindMismatch {
        /// The mnemonic as written.
        mnemonic: String,
        /// 1-based operand position.
        index: usize,
        /// Description of the accepted operand kinds.
        expected: &'static str,
        /// The operand as written.
        found: String,
    },

    /// The assembler directive is not supported.
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    /// A supported directive has invalid arguments.
    #[error("malformed directive `{directive}`: {reason}")]
    MalformedDirective {
        /// The directive name.
        directive: String,
        /// Why the arguments were rejected.
        reason: String,
    },

    /// A label or symbol is defined more than once.
    #[error("label `{0}` is already defined")]
    DuplicateLabel(String),

    /// An instruction appears outside the `.text` section.
    #[error("instruction `{0}` outside the .text section")]
    MisplacedInstruction(String),

    /// An expression references a symbol that is not yet defined.
    #[error("undefined symbol `{0}` in expression")]
    UndefinedSymbol(String),
}

/// A fatal error encountered while parsing a single source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based source line number.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a parse error for the given line.
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// A label reference that could not be bound after the full parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The referenced label was never defined.
    #[error("line {line}: undefined label `{name}`")]
    UndefinedLabel {
        /// The label name.
        name: String,
        /// 1-based line of the referencing instruction.
        line: usize,
    },

    /// A branch names a data symbol or constant instead of a code label.
    #[error("line {line}: `{name}` is not a code label")]
    NotCodeLabel {
        /// The symbol name.
        name: String,
        /// 1-based line of the referencing instruction.
        line: usize,
    },
}

/// Any error produced while turning source text into a program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    /// Tokenizing or line parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Label resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

impl AsmError {
    /// Returns the 1-based source line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line,
            Self::Resolution(
                ResolutionError::UndefinedLabel { line, .. }
                | ResolutionError::NotCodeLabel { line, .. },
            ) => *line,
        }
    }
}

/// Errors raised by name-based register file access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The name does not identify a modelled register.
    #[error("unknown register `{0}`")]
    UnknownRegister(String),
}

/// Errors that fault a running program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The program counter left the program through an indirect branch.
    #[error("invalid program counter {pc} (program has {len} instructions)")]
    InvalidProgramCounter {
        /// The offending instruction index.
        pc: u64,
        /// Number of instructions in the program.
        len: usize,
    },

    /// The instruction cannot be carried out (unknown syscall, bad descriptor, bad form).
    #[error("line {line}: unsupported operation: {detail}")]
    UnsupportedOperation {
        /// Source line of the instruction.
        line: usize,
        /// What was requested.
        detail: String,
    },

    /// A trapping arithmetic condition (only division by zero when trapping is enabled).
    #[error("line {line}: arithmetic fault: {detail}")]
    ArithmeticFault {
        /// Source line of the instruction.
        line: usize,
        /// Description of the fault.
        detail: &'static str,
    },

    /// A load, store or syscall buffer fell outside data memory.
    #[error("line {line}: memory fault accessing {size} byte(s) at {address:#x}")]
    MemoryFault {
        /// Source line of the instruction.
        line: usize,
        /// First byte address of the access.
        address: u64,
        /// Access width in bytes.
        size: u64,
    },

    /// The configured step guard was exhausted.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded {
        /// The configured limit.
        limit: u64,
    },

    /// The configured data memory cannot be built.
    #[error("cannot provide {size} byte(s) of data memory at {base:#x}")]
    MemoryUnavailable {
        /// Configured data base address.
        base: u64,
        /// Configured free memory size.
        size: usize,
    },

    /// `run` was called before a program was parsed.
    #[error("no program loaded")]
    NoProgramLoaded,
}
