mod args;
mod driver_error;

use anyhow::Context;
use args::Args;
use clap::Parser;
use driver_error::DriverError;
use log::{info, LevelFilter};
use std::fs;
use std::process::exit;
use ulc::{emission, ir, regalloc, CompileOptions, Compiler};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_source(args: &Args) -> Result<String, DriverError> {
    if !args.input.exists() {
        let filename = args.input.to_string_lossy().to_string();
        return Err(DriverError::InputFileDoesNotExist(filename));
    }
    Ok(fs::read_to_string(&args.input)?)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = read_source(args)?;
    let options = CompileOptions {
        backend: args.backend,
        file_path: args.input.display().to_string(),
    };
    let mut compiler = Compiler::new(options);

    let tokens = compiler.tokenize(&source).map_err(DriverError::from)?;
    if args.lex {
        for token in &tokens {
            println!("{}\t{token}", token.position());
        }
        return Ok(());
    }

    let tree = compiler.parse(&tokens).map_err(DriverError::from)?;
    if args.parse {
        print!("{tree}");
        return Ok(());
    }

    if args.ir || args.regalloc {
        let ir = compiler.lower(&tree).map_err(DriverError::from)?;
        let ir = if args.regalloc {
            regalloc::allocate(&ir)
        } else {
            ir
        };
        print!("{}", ir::dump(&ir));
        return Ok(());
    }

    let program = compiler.generate(&tree).map_err(DriverError::from)?;
    if args.codegen {
        print!("{}", emission::body_text(&program.body));
        return Ok(());
    }

    let output = args.output_path();
    fs::write(&output, program.to_string())
        .with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

pub fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("{err:#}");
        let code = err
            .downcast_ref::<DriverError>()
            .map_or(1, DriverError::exit_code);
        exit(code);
    }
}
