use crate::lexer::Token;

/// Walks a token slice, stepping over comments.
#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
    last: Option<&'a Token>,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            last: None,
        }
    }

    /// Most recently returned token.
    pub fn last(&self) -> Option<&'a Token> {
        self.last
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.tokens.get(self.position..)?;
        let skipped = rest.iter().take_while(|t| t.kind().is_comment()).count();
        self.position += skipped;
        let next = self.tokens.get(self.position)?;
        self.position += 1;
        self.last = Some(next);
        Some(next)
    }
}
