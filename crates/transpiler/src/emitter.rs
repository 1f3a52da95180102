//! Indentation-aware assembly text writer.

/// Spaces per indentation level.
const INDENT: &str = "    ";

/// Accumulates assembly lines at the current indentation level.
#[derive(Clone, Debug, Default)]
pub struct Emitter {
    contents: String,
    level: usize,
}

impl Emitter {
    /// Creates an empty writer at indentation level 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.level {
            self.contents.push_str(INDENT);
        }
        self.contents.push_str(text.as_ref());
        self.contents.push('\n');
    }

    /// Increases the indentation of subsequent lines.
    pub const fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation of subsequent lines.
    pub const fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// The text written so far.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Consumes the writer, returning its text.
    pub fn into_contents(self) -> String {
        self.contents
    }
}
