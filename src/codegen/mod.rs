pub mod asm_ast;
mod asm_macro;
mod frame;
mod gen;
mod tree_walk;


use crate::error::{CompilerFault, Result};
use crate::ir::Operation;
use crate::text::Position;
use log::debug;

pub use asm_ast::*;
pub use frame::{Frame, SLOT_SIZE};
pub use tree_walk::{emit, emit_program, emit_text};

/// Translates register-allocated operations into instructions.
pub fn codegen(allocated: &[Operation]) -> Result<AsmProgram> {
    let mut generator = gen::Generator::new();
    for op in allocated {
        generator.operation(op)?;
    }
    let program = generator.finish();
    debug!(
        "generated {} instructions, {} byte frame",
        program.body.len(),
        program.frame_size
    );
    Ok(program)
}

/// Parses an integer literal that has to fit a 32-bit immediate.
pub(crate) fn immediate(text: &str, position: Option<&Position>) -> Result<i64> {
    text.parse::<i32>().map(i64::from).map_err(|err| {
        CompilerFault::unimplemented(
            "integer literals wider than 32 bits",
            format!("`{text}`: {err}"),
            position.cloned(),
        )
        .into()
    })
}
