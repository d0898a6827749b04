use crate::regalloc::Register;

pub type AsmInstructions = Vec<AsmInstruction>;

/// Body of `_start` plus the stack space its slots need.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AsmProgram {
    pub body: AsmInstructions,
    pub frame_size: i64,
}

/// Intel operand order: destination first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInstruction {
    Mov(Operand, Operand),
    Binary(BinaryOp, Operand, Operand),
    Neg(Operand),
    Push(Operand),
    Pop(Operand),
    Cdq,
    Idiv(Operand),
    AllocateStack(i64),
    DeallocateStack(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Imm(i64),
    Reg(Register),
    /// `dword [ebp+offset]`
    Stack(i64),
    /// `dword [esp]`
    StackTop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Imul,
}

impl Operand {
    #[inline]
    pub fn is_reg(&self, register: Register) -> bool {
        matches!(self, Self::Reg(r) if *r == register)
    }
}

impl From<Register> for Operand {
    fn from(register: Register) -> Self {
        Self::Reg(register)
    }
}
