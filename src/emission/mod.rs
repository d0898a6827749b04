//! Code emission using [Display]
//!
//! Implements [Display] for the instruction types of [codegen](crate::codegen) in
//! Intel syntax, so a program can be written out with [to_string] or used as a
//! formatting argument.
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string

use crate::codegen::*;

use std::fmt;

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Imul => write!(f, "imul"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Imm(i) => write!(f, "{i}"),
            Self::Reg(r) => write!(f, "{r}"),
            Self::Stack(offset) => write!(f, "dword [ebp{offset:+}]"),
            Self::StackTop => write!(f, "dword [esp]"),
        }
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mov(dst, src) => write!(f, "mov {dst}, {src}"),
            Self::Binary(op, dst, src) => write!(f, "{op} {dst}, {src}"),
            Self::Neg(operand) => write!(f, "neg {operand}"),
            Self::Push(operand) => write!(f, "push {operand}"),
            Self::Pop(operand) => write!(f, "pop {operand}"),
            Self::Cdq => write!(f, "cdq"),
            Self::Idiv(operand) => write!(f, "idiv {operand}"),
            Self::AllocateStack(size) => write!(f, "sub esp, {size}"),
            Self::DeallocateStack(size) => write!(f, "add esp, {size}"),
        }
    }
}

/// Instructions one per line, without any surrounding program.
pub fn body_text(instructions: &[AsmInstruction]) -> String {
    instructions
        .iter()
        .map(|instruction| format!("{instruction}\n"))
        .collect()
}

/// Complete program: `_start` sets up a frame, runs the body and exits
/// with the value left in eax.
impl fmt::Display for AsmProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "section .text")?;
        writeln!(f, "\tglobal _start")?;
        writeln!(f, "_start:")?;
        //Prologue:
        writeln!(f, "\tpush ebp")?;
        writeln!(f, "\tmov ebp, esp")?;
        if self.frame_size > 0 {
            writeln!(f, "\t{}", AsmInstruction::AllocateStack(self.frame_size))?;
        }
        for instruction in &self.body {
            writeln!(f, "\t{instruction}")?;
        }
        //Epilogue:
        writeln!(f, "\tmov esp, ebp")?;
        writeln!(f, "\tpop ebp")?;
        writeln!(f, "\tmov ebx, eax")?;
        writeln!(f, "\tmov eax, 1")?;
        writeln!(f, "\tint 0x80")
    }
}
