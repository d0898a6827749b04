//! Table-driven lexer.
//!
//! Every step runs all rules of the current state against the rest of the
//! input and keeps the match that starts first; rules declared earlier win
//! ties. Text in front of the winning match is skipped.

mod cursor;
pub mod grammar;
pub mod token;


use crate::error::{ErrorKind, Result};
use crate::text::{Position, TextEntity, ANONYMOUS_FILE};
use cursor::Cursor;
use log::{debug, trace, warn};
use regex::{Match, Regex};
use std::sync::Arc;

pub use grammar::{Grammar, Rule, RuleSet, StateId, START_STATE};
pub use token::{Associativity, Precedence, Token, TokenKind};

pub type Tokens = Vec<Token>;

#[derive(Debug, Clone)]
pub struct Lexer {
    grammar: Grammar,
    file_path: Arc<str>,
}

impl Lexer {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            file_path: Arc::from(ANONYMOUS_FILE),
        }
    }

    /// Sets the file name reported in token positions.
    #[must_use]
    pub fn with_file(mut self, file_path: impl AsRef<str>) -> Self {
        self.file_path = Arc::from(file_path.as_ref());
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn tokenize(&self, source: &str) -> Result<Tokens> {
        let mut cursor = Cursor::new(source, Position::start_of(Arc::clone(&self.file_path)));
        let mut state = START_STATE;
        let mut tokens = Tokens::new();

        while !cursor.is_eof() {
            let rules = self
                .grammar
                .state(state)
                .ok_or_else(|| ErrorKind::UnknownState(state).at(cursor.position().clone()))?;

            let Some((rule, found)) = earliest_match(rules, source, cursor.offset()) else {
                cursor.skip_whitespaces();
                match cursor.peek() {
                    None => break,
                    Some(found) => {
                        let err = ErrorKind::LexError { found, state };
                        return Err(err.at(cursor.position().clone()).into());
                    }
                }
            };

            let skipped = &source[cursor.offset()..found.start()];
            if !skipped.trim().is_empty() {
                warn!("{}: skipped unrecognised text {skipped:?}", cursor.position());
            }
            cursor.advance_to(found.start());
            let lexeme = TextEntity::new(found.as_str(), cursor.position().clone());
            cursor.advance_to(found.end());

            let token = Token::new(rule.kind, lexeme, rule.precedence, rule.associativity);
            trace!("{}: {token}", token.position());
            tokens.push(token);
            state = rule.next_state;
        }

        debug!("lexed {} tokens from {}", tokens.len(), self.file_path);
        Ok(tokens)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(Grammar::default())
    }
}

/// Tokenizes `source` with the default grammar.
pub fn tokenize(source: &str) -> Result<Tokens> {
    Lexer::default().tokenize(source)
}

fn earliest_match<'r, 's>(
    rules: &'r RuleSet,
    source: &'s str,
    from: usize,
) -> Option<(&'r Rule, Match<'s>)> {
    let mut best: Option<(&Rule, Match)> = None;
    for rule in rules {
        let Some(found) = find_non_empty(&rule.pattern, source, from) else {
            continue;
        };
        let earlier = best.map_or(true, |(_, current)| found.start() < current.start());
        if earlier {
            best = Some((rule, found));
        }
    }
    best
}

fn find_non_empty<'s>(pattern: &Regex, source: &'s str, from: usize) -> Option<Match<'s>> {
    let mut at = from;
    while at <= source.len() {
        let found = pattern.find_at(source, at)?;
        if !found.is_empty() {
            return Some(found);
        }
        let step = source[found.end()..].chars().next().map_or(1, char::len_utf8);
        at = found.end() + step;
    }
    None
}
