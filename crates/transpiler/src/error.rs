//! Transpiler error definitions.

use thiserror::Error;

/// The specific reason a source line could not be translated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// `let` without the `let NAME = VALUE` shape, or redefining a variable.
    #[error("invalid syntax for let call: `{0}`")]
    InvalidLet(String),

    /// `label` or `goto` without a name.
    #[error("invalid syntax for {keyword}: `{line}`")]
    MissingName {
        /// `label` or `goto`.
        keyword: &'static str,
        /// The offending source line.
        line: String,
    },

    /// A `print`/`println` argument that is not a quoted string.
    #[error("encountered invalid literal: {0}")]
    InvalidLiteral(String),

    /// A value that is neither a known variable nor an integer literal.
    #[error("invalid value `{value}` in `{line}`")]
    InvalidValue {
        /// The value as written.
        value: String,
        /// The offending source line.
        line: String,
    },

    /// An assignment with an unsupported operator or shape.
    #[error("invalid syntax: `{0}`")]
    InvalidSyntax(String),

    /// The first word is not a keyword or a declared variable.
    #[error("encountered unexpected operation in line that reads `{0}`")]
    UnexpectedOperation(String),

    /// More variables than there are registers to hold them.
    #[error("too many variables: no register left for `{0}`")]
    TooManyVariables(String),
}

/// A translation failure, tagged with its 1-based source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct CompileError {
    /// 1-based source line number.
    pub line: usize,
    /// What went wrong.
    pub kind: CompileErrorKind,
}

impl CompileError {
    /// Creates an error for the given line.
    pub const fn new(line: usize, kind: CompileErrorKind) -> Self {
        Self { line, kind }
    }
}
