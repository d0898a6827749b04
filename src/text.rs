//! Source positions and the text slices tokens are cut from.

use std::fmt;
use std::sync::Arc;

/// Placeholder file name used when source text does not come from a file.
pub const ANONYMOUS_FILE: &str = "<input>";

/// Location of a character in a source file.
///
/// `index` is a 0-based byte offset, `line` and `column` are 1-based.
/// Columns count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    file_path: Arc<str>,
    index: usize,
    line: u32,
    column: u32,
}

impl Position {
    pub fn new(file_path: Arc<str>, index: usize, line: u32, column: u32) -> Self {
        Self {
            file_path,
            index,
            line,
            column,
        }
    }

    /// Position of the first character of `file_path`.
    pub fn start_of(file_path: Arc<str>) -> Self {
        Self::new(file_path, 0, 1, 1)
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Moves the position past `c`.
    pub(crate) fn advance(&mut self, c: char) {
        self.index += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start_of(Arc::from(ANONYMOUS_FILE))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.column)
    }
}

/// A piece of source text together with where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntity {
    text: String,
    position: Position,
}

impl TextEntity {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl fmt::Display for TextEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
