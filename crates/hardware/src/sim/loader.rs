//! Source Loader.
//!
//! Reads assembly source from disk as a list of lines, the input shape the
//! assembler expects. Line endings (`\n` or `\r\n`) are stripped.

use std::fs;
use std::io;
use std::path::Path;

/// Reads a source file into lines.
///
/// # Arguments
///
/// * `path` - Path to the source file.
///
/// # Returns
///
/// The lines of the file, without terminators.
pub fn load_source(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}
