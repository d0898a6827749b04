//! Per-compilation context tying the stages together.

use crate::ast::SyntaxTree;
use crate::codegen::{self, AsmProgram};
use crate::error::Result;
use crate::ir::{IntermediateRepresentation, IrBuilder};
use crate::lexer::{Grammar, Lexer, Token, Tokens};
use crate::symtab::SymbolTable;
use crate::text::ANONYMOUS_FILE;
use crate::{parser, regalloc};
use log::info;
use std::fmt;
use std::str::FromStr;

/// Which code generator produces the final instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Three-address IR, register allocation, then instruction selection.
    #[default]
    Ir,
    /// Direct walk over the syntax tree.
    TreeWalk,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ir" => Ok(Self::Ir),
            "tree" | "tree-walk" => Ok(Self::TreeWalk),
            _ => Err(format!("unknown backend `{s}`, expected `ir` or `tree`")),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ir => write!(f, "ir"),
            Self::TreeWalk => write!(f, "tree"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub backend: Backend,
    /// Name reported in positions and error messages.
    pub file_path: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            file_path: ANONYMOUS_FILE.to_owned(),
        }
    }
}

/// Shared state across compilations: the grammar and the symbol table.
/// Temporary names and variable bindings are scoped to a single lowering.
#[derive(Debug)]
pub struct Compiler {
    options: CompileOptions,
    lexer: Lexer,
    symbols: SymbolTable,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self::with_grammar(options, Grammar::default())
    }

    pub fn with_grammar(options: CompileOptions, grammar: Grammar) -> Self {
        let lexer = Lexer::new(grammar).with_file(&options.file_path);
        Self {
            options,
            lexer,
            symbols: SymbolTable::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn tokenize(&self, source: &str) -> Result<Tokens> {
        self.lexer.tokenize(source)
    }

    pub fn parse(&mut self, tokens: &[Token]) -> Result<SyntaxTree> {
        parser::parse_with(tokens, &mut self.symbols)
    }

    /// Lowers `tree` with fresh temporaries and no variable bindings.
    pub fn lower(&self, tree: &SyntaxTree) -> Result<IntermediateRepresentation> {
        IrBuilder::new().generate(tree)
    }

    /// Instructions for `tree` using the configured backend.
    pub fn generate(&mut self, tree: &SyntaxTree) -> Result<AsmProgram> {
        match self.options.backend {
            Backend::Ir => {
                let ir = self.lower(tree)?;
                let allocated = regalloc::allocate(&ir);
                codegen::codegen(&allocated)
            }
            Backend::TreeWalk => codegen::emit_program(tree),
        }
    }

    /// Runs the whole pipeline on `source`.
    pub fn compile(&mut self, source: &str) -> Result<AsmProgram> {
        info!(
            "compiling {} with the {} backend",
            self.options.file_path, self.options.backend
        );
        let tokens = self.tokenize(source)?;
        let tree = self.parse(&tokens)?;
        self.generate(&tree)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

/// Compiles `source` with default options into assembly text.
pub fn compile_to_string(source: &str) -> Result<String> {
    Compiler::default().compile(source).map(|program| program.to_string())
}
