//! Lowering of the syntax tree into three-address operations.
//!
//! Every non-literal operand gets a fresh temporary named `base#n`. The
//! counter is per base name and lives in an [`IrBuilder`], so temporaries
//! are unique within one compilation and independent across compilations.

mod operation;

use crate::ast::{NodeKind, NodeRef, SyntaxTree};
use crate::codegen::immediate;
use crate::error::{CompileError, CompilerFault, ErrorKind, Result};
use log::debug;
use std::collections::HashMap;

pub use operation::{dump, IntermediateRepresentation, OpKind, Operation, Value};

/// Base name of temporaries that hold intermediate results.
pub const ANONYMOUS: &str = "__temp__";

#[derive(Debug, Default)]
pub struct IrBuilder {
    counters: HashMap<String, usize>,
    /// Source identifier -> temporary holding its latest value.
    bindings: HashMap<String, String>,
}

/// Lowers `tree` with a fresh [`IrBuilder`].
pub fn generate_ir(tree: &SyntaxTree) -> Result<IntermediateRepresentation> {
    IrBuilder::new().generate(tree)
}

impl IrBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused name for `base`, e.g. `x#0`, `x#1`, ...
    pub fn fresh(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_owned()).or_insert(0);
        let name = format!("{base}#{counter}");
        *counter += 1;
        name
    }

    /// Temporary currently holding the value of `name`.
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    pub fn generate(&mut self, tree: &SyntaxTree) -> Result<IntermediateRepresentation> {
        let mut ir = IntermediateRepresentation::new();
        for statement in tree.statements() {
            self.lower_statement(statement, &mut ir)?;
        }
        debug!(
            "lowered {} statements into {} operations",
            tree.root().child_count(),
            ir.len()
        );
        Ok(ir)
    }

    fn lower_statement(&mut self, node: NodeRef, ir: &mut IntermediateRepresentation) -> Result<()> {
        match node.kind() {
            kind if kind.is_arithmetic() => {
                let dest = Value::Variable(self.fresh(ANONYMOUS));
                self.lower_into(node, dest, ir)
            }
            NodeKind::Assign => self.lower_assign(node, ir).map(|_| ()),
            NodeKind::HasType => Ok(()),
            NodeKind::Integer | NodeKind::Identifier if node.is_leaf() => {
                let source = self.operand(node)?;
                let dest = Value::Variable(self.fresh(ANONYMOUS));
                ir.push(Operation::load(dest, source));
                Ok(())
            }
            _ => Err(unsupported(node, "statement")),
        }
    }

    /// Lowers `target = value` and returns the temporary now bound to `target`.
    fn lower_assign(&mut self, node: NodeRef, ir: &mut IntermediateRepresentation) -> Result<String> {
        let Some((target, value)) = node.operands() else {
            return Err(unsupported(node, "assignment"));
        };
        let name = match (target.kind(), target.value()) {
            (NodeKind::Identifier, Some(name)) if target.is_leaf() => name,
            _ => return Err(unsupported(target, "assignment target")),
        };

        let dest = self.fresh(name);
        match value.kind() {
            NodeKind::Assign => {
                let inner = self.lower_assign(value, ir)?;
                let load = Operation::load(Value::Variable(dest.clone()), Value::Variable(inner));
                ir.push(load);
            }
            _ if value.is_leaf() => {
                let source = self.operand(value)?;
                ir.push(Operation::load(Value::Variable(dest.clone()), source));
            }
            _ => self.lower_into(value, Value::Variable(dest.clone()), ir)?,
        }
        self.bindings.insert(name.to_owned(), dest.clone());
        Ok(dest)
    }

    /// Emits the operations computing binary `node` into `dest`.
    fn lower_into(
        &mut self,
        node: NodeRef,
        dest: Value,
        ir: &mut IntermediateRepresentation,
    ) -> Result<()> {
        let (Some(op), Some((left, right))) = (OpKind::from_node(node.kind()), node.operands())
        else {
            return Err(unsupported(node, "operator"));
        };

        // both temporaries are reserved before either side is lowered
        let left_dest = (!left.is_leaf()).then(|| Value::Variable(self.fresh(ANONYMOUS)));
        let right_dest = (!right.is_leaf()).then(|| Value::Variable(self.fresh(ANONYMOUS)));

        let source1 = match left_dest {
            Some(temp) => {
                self.lower_into(left, temp.clone(), ir)?;
                temp
            }
            None => self.operand(left)?,
        };
        let source2 = match right_dest {
            Some(temp) => {
                self.lower_into(right, temp.clone(), ir)?;
                temp
            }
            None => self.operand(right)?,
        };

        ir.push(Operation::new(op, dest, source1, source2));
        Ok(())
    }

    fn operand(&self, leaf: NodeRef) -> Result<Value> {
        let text = leaf.value().unwrap_or_default();
        match leaf.kind() {
            NodeKind::Integer => {
                immediate(text, leaf.position())?;
                Ok(Value::Literal(text.to_owned()))
            }
            NodeKind::Identifier => match self.binding(text) {
                Some(temp) => Ok(Value::Variable(temp.to_owned())),
                None => {
                    let position = leaf.position().cloned().unwrap_or_default();
                    Err(ErrorKind::UnknownSymbol(text.to_owned()).at(position).into())
                }
            },
            _ => Err(unsupported(leaf, "operand")),
        }
    }
}

fn unsupported(node: NodeRef, role: &str) -> CompileError {
    let feature = match node.kind() {
        NodeKind::Identifier => "function application".to_owned(),
        NodeKind::Assign => "nested assignment".to_owned(),
        NodeKind::Float | NodeKind::String => "non-integer literals".to_owned(),
        NodeKind::Type | NodeKind::HasType | NodeKind::MapTo => "type expressions".to_owned(),
        kind => format!("{kind:?} nodes"),
    };
    let cause = format!("`{}` cannot be lowered as {role}", node.sexpr());
    CompilerFault::unimplemented(feature, cause, node.position().cloned()).into()
}
