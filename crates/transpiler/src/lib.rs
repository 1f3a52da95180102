//! Transpiler from a line-oriented toy language to armsim assembly.
//!
//! The language has one statement per line:
//! 1. **Variables:** `let NAME = VALUE`, then `NAME = VALUE`, `NAME += VALUE`,
//!    `NAME -= VALUE`, `NAME *= VALUE` and `NAME = A op B` with `op` one of `+ - *`.
//! 2. **Control flow:** `label NAME` and `goto NAME`.
//! 3. **Output:** `print "text"` and `println "text"` write to standard output.
//! 4. **Exit:** `exit [VALUE]` ends the program; later lines are ignored.
//!
//! Values are declared variables or integer literals.
//!
//! ```
//! let asm = armsim_lang::compile("let x = 5\nx += 2\nexit x").unwrap();
//! assert!(asm.contains("add x10, x10, #2"));
//! ```

/// Statement translation.
pub mod compiler;
/// Indentation-aware output writer.
pub mod emitter;
/// Error types.
pub mod error;

use tracing::debug;

pub use crate::compiler::{Compiler, Control};
pub use crate::error::{CompileError, CompileErrorKind};

/// Translates a complete program into assembly text.
///
/// # Errors
///
/// Returns the first line that fails to translate.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let mut compiler = Compiler::new();
    for (idx, line) in source.lines().enumerate() {
        if compiler.statement(line, idx + 1)? == Control::Stop {
            let ignored = source.lines().skip(idx + 1).filter(|l| !l.trim().is_empty()).count();
            if ignored > 0 {
                debug!(line = idx + 1, ignored, "lines after exit ignored");
            }
            break;
        }
    }
    Ok(compiler.finish())
}
