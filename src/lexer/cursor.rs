use crate::text::Position;
use std::str::Chars;

/// Walks the source text and keeps the [`Position`] of the next character.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, start: Position) -> Self {
        let chars = source.chars();
        Self {
            source,
            chars,
            position: start,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn take(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position.advance(c);
        Some(c)
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    pub fn skip_whitespaces(&mut self) {
        while self.skip_if(char::is_whitespace) {}
    }

    /// Advances until the byte offset `index` is reached.
    pub fn advance_to(&mut self, index: usize) {
        while self.offset() < index && self.take().is_some() {}
    }

    /// Byte offset of the next character.
    pub fn offset(&self) -> usize {
        self.source.len() - self.chars.as_str().len()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }

    pub fn is_eof(&self) -> bool {
        self.as_str().is_empty()
    }
}
