use clap::Parser;
use std::path::PathBuf;
use ulc::Backend;

/// U language compiler
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Stop after lexing and print the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and print the syntax tree
    #[arg(long)]
    pub parse: bool,

    /// Stop after producing the three-address IR
    #[arg(long)]
    pub ir: bool,

    /// Stop after register allocation
    #[arg(long)]
    pub regalloc: bool,

    /// Stop after code generation and print the bare instructions
    #[arg(long)]
    pub codegen: bool,

    /// Code generator to use: `ir` or `tree`
    #[arg(long, default_value_t = Backend::Ir)]
    pub backend: Backend,

    /// Output file, defaults to the input with an `.s` extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    pub input: PathBuf,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("s"))
    }
}
