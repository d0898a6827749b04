use crate::ast::NodeKind;
use crate::regalloc::Register;
use std::fmt;

/// Operand of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Literal(String),
    Variable(String),
    /// Only present after register allocation.
    Register(Register),
    None,
}

impl Value {
    pub fn variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }

    pub fn register(&self) -> Option<Register> {
        match self {
            Self::Register(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `Save var, reg` stores a register into the variable's home slot.
    Save,
    /// `Load dst, src` copies `src` into `dst`.
    Load,
    Nop,
}

impl OpKind {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }

    /// Arithmetic operation computed by a tree node, if any.
    pub fn from_node(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Add => Some(Self::Add),
            NodeKind::Subtract => Some(Self::Sub),
            NodeKind::Multiply => Some(Self::Mul),
            NodeKind::Divide => Some(Self::Div),
            _ => None,
        }
    }
}

/// Three-address instruction: `op destination, source1, source2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub op: OpKind,
    pub destination: Value,
    pub source1: Value,
    pub source2: Value,
}

pub type IntermediateRepresentation = Vec<Operation>;

impl Operation {
    pub fn new(op: OpKind, destination: Value, source1: Value, source2: Value) -> Self {
        Self {
            op,
            destination,
            source1,
            source2,
        }
    }

    pub fn load(destination: Value, source: Value) -> Self {
        Self::new(OpKind::Load, destination, source, Value::None)
    }

    pub fn save(variable: impl Into<String>, register: Register) -> Self {
        Self::new(
            OpKind::Save,
            Value::Variable(variable.into()),
            Value::Register(register),
            Value::None,
        )
    }

    /// Whether the operation reads `name`.
    pub fn reads(&self, name: &str) -> bool {
        self.sources().iter().any(|v| v.variable() == Some(name))
    }

    pub fn sources(&self) -> [&Value; 2] {
        [&self.source1, &self.source2]
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "{text}"),
            Self::Variable(name) => write!(f, "{{{name}}}"),
            Self::Register(r) => write!(f, "{r}"),
            Self::None => write!(f, "_"),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Save => "SAVE",
            Self::Load => "LOAD",
            Self::Nop => "NOP",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        for value in [&self.destination, &self.source1, &self.source2] {
            if !value.is_none() {
                write!(f, " {value}")?;
            }
        }
        Ok(())
    }
}

/// One operation per line.
pub fn dump(ir: &[Operation]) -> String {
    ir.iter().map(|op| format!("{op}\n")).collect()
}
