//! Direct tree to instruction translation.
//!
//! Results accumulate in eax, ebx is the scratch register. Operator
//! children are evaluated right first so the left result ends up in eax.

use super::asm_ast::*;
use super::asm_macro::assemble;
use super::immediate;
use crate::ast::{NodeKind, NodeRef, SyntaxTree};
use crate::error::{CompilerFault, Result};
use crate::regalloc::Register;
use log::debug;

enum Child<'a> {
    Literal(i64),
    Operator(NodeRef<'a>),
}

/// Instructions computing the binary arithmetic `node` into eax.
pub fn emit(node: NodeRef) -> Result<AsmInstructions> {
    let mut instructions = AsmInstructions::new();
    emit_into(&mut instructions, node)?;
    Ok(instructions)
}

/// Same as [`emit`], rendered one instruction per line.
pub fn emit_text(node: NodeRef) -> Result<String> {
    emit(node).map(|instructions| crate::emission::body_text(&instructions))
}

/// Translates every statement of `tree`; the last value is left in eax.
pub fn emit_program(tree: &SyntaxTree) -> Result<AsmProgram> {
    let mut body = AsmInstructions::new();
    for statement in tree.statements() {
        match statement.kind() {
            kind if kind.is_arithmetic() => emit_into(&mut body, statement)?,
            NodeKind::Integer => {
                let value = literal(statement)?;
                assemble!(body { Mov %Eax, #value; });
            }
            NodeKind::HasType => (),
            _ => return Err(unsupported(statement)),
        }
    }
    debug!("tree walk emitted {} instructions", body.len());
    Ok(AsmProgram {
        body,
        frame_size: 0,
    })
}

fn emit_into(out: &mut AsmInstructions, node: NodeRef) -> Result<()> {
    let kind = node.kind();
    let Some((left, right)) = node.operands().filter(|_| kind.is_arithmetic()) else {
        return Err(unsupported(node));
    };

    match (classify(left)?, classify(right)?) {
        (Child::Operator(left), Child::Operator(right)) => {
            emit_into(out, right)?;
            assemble!(out { Push %Eax; });
            emit_into(out, left)?;
            assemble!(out { Pop %Ebx; });
            combine(out, kind, Operand::Reg(Register::Ebx));
        }
        (Child::Literal(lhs), Child::Operator(right)) => {
            emit_into(out, right)?;
            match kind {
                NodeKind::Subtract | NodeKind::Divide => {
                    assemble!(out {
                        Mov %Ebx, %Eax;
                        Mov %Eax, #lhs;
                    });
                    combine(out, kind, Operand::Reg(Register::Ebx));
                }
                _ => combine(out, kind, Operand::Imm(lhs)),
            }
        }
        (Child::Operator(left), Child::Literal(rhs)) => {
            emit_into(out, left)?;
            combine_literal(out, kind, rhs);
        }
        (Child::Literal(lhs), Child::Literal(rhs)) => {
            assemble!(out { Mov %Eax, #lhs; });
            combine_literal(out, kind, rhs);
        }
    }
    Ok(())
}

/// eax = eax <op> `rhs`
fn combine(out: &mut AsmInstructions, kind: NodeKind, rhs: Operand) {
    match kind {
        NodeKind::Add => {
            assemble!(out { Binary Add %Eax, rhs; });
        }
        NodeKind::Subtract => {
            assemble!(out { Binary Sub %Eax, rhs; });
        }
        NodeKind::Multiply => {
            assemble!(out { Binary Imul %Eax, rhs; });
        }
        _ => {
            assemble!(out {
                Cdq;
                Idiv rhs;
            });
        }
    }
}

/// eax = eax <op> `rhs`; idiv has no immediate form so the divisor goes
/// through ebx.
fn combine_literal(out: &mut AsmInstructions, kind: NodeKind, rhs: i64) {
    if kind == NodeKind::Divide {
        assemble!(out { Mov %Ebx, #rhs; });
        combine(out, kind, Operand::Reg(Register::Ebx));
    } else {
        combine(out, kind, Operand::Imm(rhs));
    }
}

fn classify(node: NodeRef) -> Result<Child> {
    match node.kind() {
        NodeKind::Integer => literal(node).map(Child::Literal),
        kind if kind.is_arithmetic() => Ok(Child::Operator(node)),
        _ => Err(unsupported(node)),
    }
}

fn literal(node: NodeRef) -> Result<i64> {
    immediate(node.value().unwrap_or_default(), node.position())
}

fn unsupported(node: NodeRef) -> crate::CompileError {
    CompilerFault::unimplemented(
        format!("{:?} in the tree walking back end", node.kind()),
        format!("`{}` is not integer arithmetic", node.sexpr()),
        node.position().cloned(),
    )
    .into()
}
