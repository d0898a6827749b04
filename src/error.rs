//! Error taxonomy shared by every compilation stage.
//!
//! Two shapes exist: [`CompilationError`] points at a place in the source,
//! [`CompilerFault`] names a feature the compiler recognises but cannot
//! translate. Both fold into [`CompileError`], which is what stage
//! functions return.

use crate::text::Position;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Exit status reported for any failed compilation.
pub const DEFAULT_ERROR_CODE: i32 = -1;

/// What went wrong, without the where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Unexpected character `{found}` in lexer state {state}")]
    LexError { found: char, state: usize },
    #[error("Lexer state {0} does not exist")]
    UnknownState(usize),
    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,
    #[error("Unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error("Missing operand for `{0}`")]
    MissingOperand(String),
    #[error("Dangling operand")]
    DanglingOperand,
    #[error("Unterminated statement")]
    UnterminatedStatement,
}

impl ErrorKind {
    pub fn at(self, position: Position) -> CompilationError {
        CompilationError {
            kind: self,
            position,
        }
    }
}

/// An error with a source location attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Error: {kind} in file `{}` at line {}, column {}.",
    .position.file_path(),
    .position.line(),
    .position.column()
)]
pub struct CompilationError {
    kind: ErrorKind,
    position: Position,
}

impl CompilationError {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// Internal limitation rather than a mistake in the program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerFault {
    #[error("Fault: Attempted use of unimplemented feature -- {feature}\nCause: {cause}")]
    UnimplementedFeature {
        feature: String,
        cause: String,
        position: Option<Position>,
    },
}

impl CompilerFault {
    pub fn unimplemented(
        feature: impl Into<String>,
        cause: impl Into<String>,
        position: Option<Position>,
    ) -> Self {
        Self::UnimplementedFeature {
            feature: feature.into(),
            cause: cause.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Compilation(#[from] CompilationError),
    #[error(transparent)]
    Fault(#[from] CompilerFault),
}

impl CompileError {
    /// Process exit status the driver should report for this error.
    pub fn error_code(&self) -> i32 {
        DEFAULT_ERROR_CODE
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::Compilation(e) => Some(e.position()),
            Self::Fault(CompilerFault::UnimplementedFeature { position, .. }) => position.as_ref(),
        }
    }

    /// Kind of a positioned error, `None` for faults.
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Self::Compilation(e) => Some(e.kind()),
            Self::Fault(_) => None,
        }
    }
}
