//! Greedy register allocation over four general purpose registers.
//!
//! Every operation leaves its result in the accumulator (`eax`). Variables
//! are brought into registers on use and written back to their home slot
//! (`SAVE`) when they are displaced while still needed later.

mod register_map;
#[cfg(test)]
mod regalloc_tests;

use crate::ir::{IntermediateRepresentation, OpKind, Operation, Value};
use log::{debug, trace, warn};
use std::fmt;

pub use register_map::RegisterMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    Eax,
    Ebx,
    Ecx,
    Edx,
}

impl Register {
    pub const ALL: [Register; 4] = [Self::Eax, Self::Ebx, Self::Ecx, Self::Edx];
    /// Destination of every allocated operation.
    pub const ACCUMULATOR: Register = Self::Eax;

    pub fn name(self) -> &'static str {
        match self {
            Self::Eax => "eax",
            Self::Ebx => "ebx",
            Self::Ecx => "ecx",
            Self::Edx => "edx",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order in which registers are handed out and picked for eviction.
/// The accumulator comes last since each result overwrites it anyway.
const ALLOCATION_ORDER: [Register; 4] = [
    Register::Ebx,
    Register::Ecx,
    Register::Edx,
    Register::Eax,
];

/// Rewrites `ir` so that every variable operand is a register.
pub fn allocate(ir: &[Operation]) -> IntermediateRepresentation {
    let mut allocator = Allocator::default();
    for index in 0..ir.len() {
        allocator.lower(ir, index);
    }
    debug!(
        "allocated {} operations into {} ({} saves)",
        ir.len(),
        allocator.output.len(),
        allocator.saves
    );
    allocator.output
}

#[derive(Default)]
struct Allocator {
    map: RegisterMap,
    /// Variables whose current value sits in their home slot.
    spilled: Vec<String>,
    output: IntermediateRepresentation,
    saves: usize,
}

impl Allocator {
    fn lower(&mut self, ir: &[Operation], index: usize) {
        let op = &ir[index];
        if matches!(op.op, OpKind::Nop | OpKind::Save) {
            self.output.push(op.clone());
            return;
        }

        let source1 = self.resolve(&op.source1, ir, index);
        let source2 = self.resolve(&op.source2, ir, index);

        let Some(dest) = op.destination.variable() else {
            let rewritten = Operation::new(op.op, op.destination.clone(), source1, source2);
            self.output.push(rewritten);
            return;
        };

        let acc = Register::ACCUMULATOR;
        if let Some(occupant) = self.map.variable_in(acc).map(str::to_owned) {
            if occupant != dest && is_live(ir, index + 1, &occupant) {
                self.save(occupant, acc);
            }
        }
        self.map.bind(acc, dest);
        self.output
            .push(Operation::new(op.op, Value::Register(acc), source1, source2));
    }

    /// Register holding `value`, loading it first if necessary.
    fn resolve(&mut self, value: &Value, ir: &[Operation], index: usize) -> Value {
        let Some(name) = value.variable() else {
            return value.clone();
        };
        if let Some(register) = self.map.register_of(name) {
            return Value::Register(register);
        }

        let register = match self.free_register() {
            Some(register) => register,
            None => self.evict(ir, index),
        };
        if let Some(pos) = self.spilled.iter().rposition(|v| v == name) {
            self.spilled.remove(pos);
        } else {
            warn!("{name} is read before it was ever saved");
        }
        trace!("loading {name} into {register}");
        self.output.push(Operation::load(
            Value::Register(register),
            Value::Variable(name.to_owned()),
        ));
        self.map.bind(register, name);
        Value::Register(register)
    }

    fn free_register(&self) -> Option<Register> {
        ALLOCATION_ORDER
            .into_iter()
            .find(|&register| self.map.is_free(register))
    }

    /// Frees a register, saving its variable if something still reads it.
    ///
    /// Registers read by upcoming operations are crossed off in the order
    /// they are referenced until one candidate remains.
    fn evict(&mut self, ir: &[Operation], index: usize) -> Register {
        let mut candidates = ALLOCATION_ORDER.to_vec();
        'scan: for op in &ir[index..] {
            for name in op.sources().into_iter().filter_map(Value::variable) {
                if let Some(register) = self.map.register_of(name) {
                    candidates.retain(|&c| c != register);
                    if candidates.len() == 1 {
                        break 'scan;
                    }
                }
            }
        }

        let victim = candidates[0];
        if let Some(variable) = self.map.release(victim) {
            if is_live(ir, index, &variable) {
                self.save(variable, victim);
            } else {
                trace!("dropping dead {variable} from {victim}");
            }
        }
        victim
    }

    fn save(&mut self, variable: String, register: Register) {
        trace!("saving {variable} from {register}");
        self.output.push(Operation::save(variable.clone(), register));
        self.spilled.push(variable);
        self.saves += 1;
    }
}

/// Whether any operation from `from` on reads `name`.
fn is_live(ir: &[Operation], from: usize, name: &str) -> bool {
    ir.get(from..)
        .is_some_and(|rest| rest.iter().any(|op| op.reads(name)))
}
