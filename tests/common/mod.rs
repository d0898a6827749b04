//! Just enough of a 32-bit x86 machine to run generated programs.

use std::collections::HashMap;
use ulc::codegen::{AsmInstruction, AsmProgram, BinaryOp, Operand};
use ulc::regalloc::Register;

const STACK_BASE: i64 = 0x1000;
const WORD: i64 = 4;

#[derive(Debug, Default)]
pub struct Machine {
    registers: HashMap<Register, i32>,
    memory: HashMap<i64, i32>,
    esp: i64,
    ebp: i64,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            esp: STACK_BASE,
            ebp: STACK_BASE,
            ..Self::default()
        }
    }

    pub fn register(&self, register: Register) -> i32 {
        self.registers.get(&register).copied().unwrap_or_default()
    }

    pub fn esp(&self) -> i64 {
        self.esp
    }

    fn push(&mut self, value: i32) {
        self.esp -= WORD;
        self.memory.insert(self.esp, value);
    }

    fn pop(&mut self) -> i32 {
        let value = self.load(self.esp);
        self.esp += WORD;
        value
    }

    fn load(&self, address: i64) -> i32 {
        *self
            .memory
            .get(&address)
            .unwrap_or_else(|| panic!("read of uninitialised address {address:#x}"))
    }

    fn read(&self, operand: &Operand) -> i32 {
        match operand {
            Operand::Imm(value) => i32::try_from(*value).unwrap(),
            Operand::Reg(register) => self.register(*register),
            Operand::Stack(offset) => self.load(self.ebp + offset),
            Operand::StackTop => self.load(self.esp),
        }
    }

    fn write(&mut self, operand: &Operand, value: i32) {
        match operand {
            Operand::Imm(_) => panic!("write to an immediate"),
            Operand::Reg(register) => {
                self.registers.insert(*register, value);
            }
            Operand::Stack(offset) => {
                self.memory.insert(self.ebp + offset, value);
            }
            Operand::StackTop => {
                self.memory.insert(self.esp, value);
            }
        }
    }

    pub fn step(&mut self, instruction: &AsmInstruction) {
        match instruction {
            AsmInstruction::Mov(dst, src) => {
                let value = self.read(src);
                self.write(dst, value);
            }
            AsmInstruction::Binary(op, dst, src) => {
                let (lhs, rhs) = (self.read(dst), self.read(src));
                let value = match op {
                    BinaryOp::Add => lhs.wrapping_add(rhs),
                    BinaryOp::Sub => lhs.wrapping_sub(rhs),
                    BinaryOp::Imul => lhs.wrapping_mul(rhs),
                };
                self.write(dst, value);
            }
            AsmInstruction::Neg(operand) => {
                let value = self.read(operand).wrapping_neg();
                self.write(operand, value);
            }
            AsmInstruction::Push(operand) => {
                let value = self.read(operand);
                self.push(value);
            }
            AsmInstruction::Pop(operand) => {
                let value = self.pop();
                self.write(operand, value);
            }
            AsmInstruction::Cdq => {
                let sign = if self.register(Register::Eax) < 0 { -1 } else { 0 };
                self.registers.insert(Register::Edx, sign);
            }
            AsmInstruction::Idiv(operand) => {
                let divisor = i64::from(self.read(operand));
                assert_ne!(0, divisor, "division by zero");
                let high = i64::from(self.register(Register::Edx)) << 32;
                let low = i64::from(self.register(Register::Eax) as u32);
                let dividend = high | low;
                self.registers
                    .insert(Register::Eax, (dividend / divisor) as i32);
                self.registers
                    .insert(Register::Edx, (dividend % divisor) as i32);
            }
            AsmInstruction::AllocateStack(size) => self.esp -= size,
            AsmInstruction::DeallocateStack(size) => self.esp += size,
        }
    }

    /// Runs `_start` up to the exit syscall and returns the exit value.
    pub fn run(&mut self, program: &AsmProgram) -> i32 {
        self.push(self.ebp as i32);
        self.ebp = self.esp;
        self.esp -= program.frame_size;
        for instruction in &program.body {
            self.step(instruction);
        }
        self.esp = self.ebp;
        self.ebp = i64::from(self.pop());
        self.register(Register::Eax)
    }
}

pub fn run(program: &AsmProgram) -> i32 {
    Machine::new().run(program)
}
