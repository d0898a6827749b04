use super::asm_ast::*;
use super::asm_macro::assemble;
use super::frame::Frame;
use super::immediate;
use crate::error::{CompilerFault, Result};
use crate::ir::{OpKind, Operation, Value};
use crate::regalloc::Register;

#[derive(Default)]
pub(super) struct Generator {
    frame: Frame,
    body: AsmInstructions,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> AsmProgram {
        AsmProgram {
            body: self.body,
            frame_size: self.frame.size(),
        }
    }

    pub fn operation(&mut self, op: &Operation) -> Result<()> {
        match op.op {
            OpKind::Nop => Ok(()),
            OpKind::Load => {
                let dst = self.operand(&op.destination)?;
                let src = self.operand(&op.source1)?;
                if dst != src {
                    self.body.push(AsmInstruction::Mov(dst, src));
                }
                Ok(())
            }
            OpKind::Save => {
                let slot = self.operand(&op.destination)?;
                let src = self.operand(&op.source1)?;
                self.body.push(AsmInstruction::Mov(slot, src));
                Ok(())
            }
            OpKind::Add => self.binary(BinaryOp::Add, op),
            OpKind::Sub => self.binary(BinaryOp::Sub, op),
            OpKind::Mul => self.binary(BinaryOp::Imul, op),
            OpKind::Div | OpKind::Mod => self.division(op),
        }
    }

    fn operand(&mut self, value: &Value) -> Result<Operand> {
        match value {
            Value::Literal(text) => immediate(text, None).map(Operand::Imm),
            Value::Register(r) => Ok(Operand::Reg(*r)),
            Value::Variable(name) => Ok(self.frame.slot(name)),
            Value::None => Err(CompilerFault::unimplemented(
                "empty operands",
                "an arithmetic operation is missing a source",
                None,
            )
            .into()),
        }
    }

    fn destination(op: &Operation) -> Result<Register> {
        match op.destination.register() {
            Some(register) => Ok(register),
            None => Err(CompilerFault::unimplemented(
                "unallocated operations",
                format!("`{op}` has to be register allocated first"),
                None,
            )
            .into()),
        }
    }

    fn binary(&mut self, op: BinaryOp, operation: &Operation) -> Result<()> {
        let dst = Operand::Reg(Self::destination(operation)?);
        let lhs = self.operand(&operation.source1)?;
        let rhs = self.operand(&operation.source2)?;

        if rhs == dst && lhs != dst {
            match op {
                BinaryOp::Add | BinaryOp::Imul => {
                    self.body.push(AsmInstruction::Binary(op, dst, lhs));
                }
                BinaryOp::Sub => {
                    // dst = lhs - dst
                    self.body.push(AsmInstruction::Neg(dst.clone()));
                    self.body.push(AsmInstruction::Binary(BinaryOp::Add, dst, lhs));
                }
            }
            return Ok(());
        }

        if lhs != dst {
            self.body.push(AsmInstruction::Mov(dst.clone(), lhs));
        }
        self.body.push(AsmInstruction::Binary(op, dst, rhs));
        Ok(())
    }

    /// `idiv` needs the dividend in edx:eax, so edx is preserved around it
    /// and the divisor is read from the stack.
    fn division(&mut self, operation: &Operation) -> Result<()> {
        let dst = Self::destination(operation)?;
        if dst != Register::Eax {
            return Err(CompilerFault::unimplemented(
                "division outside the accumulator",
                format!("`{operation}` must write to eax"),
                None,
            )
            .into());
        }
        let dividend = self.operand(&operation.source1)?;
        let divisor = self.operand(&operation.source2)?;

        let body = &mut self.body;
        assemble!(body {
            Push %Edx;
            Push divisor;
        });
        if !dividend.is_reg(Register::Eax) {
            assemble!(body { Mov %Eax, dividend; });
        }
        assemble!(body {
            Cdq;
            Idiv Operand::StackTop;
        });
        if operation.op == OpKind::Mod {
            assemble!(body { Mov %Eax, %Edx; });
        }
        assemble!(body {
            DeallocateStack 4;
            Pop %Edx;
        });
        Ok(())
    }
}
