use crate::text::{Position, TextEntity};
use std::fmt;
use std::ops::Deref;

/// Binding strength of an operator token; higher binds tighter.
pub type Precedence = i32;

/// Precedence carried by every token that is not an operator.
pub const NO_PRECEDENCE: Precedence = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// decimal integer literal
    Integer,
    /// reserved, not produced by the default grammar
    Float,
    /// reserved, not produced by the default grammar
    String,
    /// variable or function name
    Identifier,
    /// type name inside a signature
    Type,
    /// :
    HasType,
    /// ->
    MapTo,
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
    /// =
    Assign,
    /// (
    LParen,
    /// )
    RParen,
    /// ;
    Semicolon,
    /// // up to the end of the line
    LineComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

impl TokenKind {
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::String)
    }

    /// Tokens that stand for a value on their own.
    #[inline]
    pub fn is_value(self) -> bool {
        self.is_literal() || matches!(self, Self::Identifier | Self::Type)
    }

    #[inline]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide
        )
    }

    /// Operators reduced by the shunting-yard loop.
    #[inline]
    pub fn is_binary_op(self) -> bool {
        self.is_arithmetic() || matches!(self, Self::Assign | Self::HasType | Self::MapTo)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment)
    }

    /// Name used when printing token streams.
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Identifier => "IDENTIFIER",
            Self::Type => "TYPE",
            Self::HasType => "HASTYPE",
            Self::MapTo => "MAPTO",
            Self::Add => "ADD",
            Self::Subtract => "SUB",
            Self::Multiply => "MUL",
            Self::Divide => "DIV",
            Self::Assign => "ASSIGN",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Semicolon => "SEMICOL",
            Self::LineComment => "LCOMMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexeme classified by the rule that matched it.
///
/// Dereferences to its [`TextEntity`], so `token.text()` and
/// `token.position()` read straight through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: TextEntity,
    precedence: Precedence,
    associativity: Associativity,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: TextEntity,
        precedence: Precedence,
        associativity: Associativity,
    ) -> Self {
        Self {
            kind,
            lexeme,
            precedence,
            associativity,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &TextEntity {
        &self.lexeme
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Whether an incoming operator `self` forces `top` off the operator stack.
    pub fn yields_to(&self, top: &Token) -> bool {
        match self.associativity {
            Associativity::Left => self.precedence <= top.precedence,
            Associativity::Right => self.precedence < top.precedence,
            Associativity::None => false,
        }
    }

    pub fn position(&self) -> &Position {
        self.lexeme.position()
    }
}

impl Deref for Token {
    type Target = TextEntity;
    fn deref(&self) -> &Self::Target {
        &self.lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.kind.is_value() {
            write!(f, "{}({})", self.kind, self.lexeme.text())
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
