//! Rule tables driving the lexer.
//!
//! A [`Grammar`] is a list of rule-sets, one per lexer state. The lexer
//! starts in state 0 and every match moves it to the matched rule's
//! `next_state`.

use super::token::{Associativity, Precedence, TokenKind, NO_PRECEDENCE};
use regex::Regex;

pub type StateId = usize;

/// Start state of every grammar.
pub const START_STATE: StateId = 0;
/// State entered after `:` while reading a type signature.
pub const SIGNATURE_STATE: StateId = 1;

#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: TokenKind,
    pub pattern: Regex,
    pub next_state: StateId,
    pub precedence: Precedence,
    pub associativity: Associativity,
}

pub type RuleSet = Vec<Rule>;

impl Rule {
    pub fn new(
        kind: TokenKind,
        pattern: &str,
        next_state: StateId,
        precedence: Precedence,
        associativity: Associativity,
    ) -> Result<Self, regex::Error> {
        let pattern = Regex::new(pattern)?;
        Ok(Self {
            kind,
            pattern,
            next_state,
            precedence,
            associativity,
        })
    }

    /// Rule for a token that is never treated as an operator.
    pub fn plain(kind: TokenKind, pattern: &str, next_state: StateId) -> Result<Self, regex::Error> {
        Self::new(kind, pattern, next_state, NO_PRECEDENCE, Associativity::None)
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    states: Vec<RuleSet>,
}

impl Grammar {
    pub fn new(states: Vec<RuleSet>) -> Self {
        Self { states }
    }

    pub fn state(&self, id: StateId) -> Option<&RuleSet> {
        self.states.get(id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Builds the grammar of the U language.
    pub fn u_language() -> Result<Self, regex::Error> {
        use Associativity::{Left, Right};
        use TokenKind as K;

        let expressions = vec![
            Rule::plain(K::LineComment, r"//.*(\n|$)", START_STATE)?,
            Rule::new(K::Assign, r"=", START_STATE, 0, Right)?,
            Rule::new(K::Add, r"\+", START_STATE, 3, Left)?,
            Rule::new(K::Subtract, r"-", START_STATE, 3, Left)?,
            Rule::new(K::Multiply, r"\*", START_STATE, 4, Left)?,
            Rule::new(K::Divide, r"/", START_STATE, 4, Left)?,
            Rule::plain(K::Integer, r"\d+", START_STATE)?,
            Rule::plain(K::LParen, r"\(", START_STATE)?,
            Rule::plain(K::RParen, r"\)", START_STATE)?,
            Rule::plain(K::Semicolon, r";", START_STATE)?,
            Rule::new(K::HasType, r":", SIGNATURE_STATE, 9, Left)?,
            Rule::new(K::Identifier, r"\b[A-Za-z_][A-Za-z0-9_]*\b", START_STATE, 0, Right)?,
        ];

        let signature = vec![
            Rule::plain(K::LineComment, r"//.*(\n|$)", START_STATE)?,
            Rule::new(K::MapTo, r"->", SIGNATURE_STATE, 10, Right)?,
            Rule::plain(K::Type, r"[A-Za-z_][A-Za-z0-9_]*", SIGNATURE_STATE)?,
            Rule::plain(K::LParen, r"\(", SIGNATURE_STATE)?,
            Rule::plain(K::RParen, r"\)", SIGNATURE_STATE)?,
            Rule::plain(K::Semicolon, r";", START_STATE)?,
        ];

        Ok(Self::new(vec![expressions, signature]))
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::u_language().expect("built-in patterns are valid")
    }
}
