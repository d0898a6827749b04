//! Names the parser may apply as operators.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Procedure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Signature text as written in the declaration.
    pub value: String,
    pub arg_count: usize,
}

impl Symbol {
    pub fn function(value: impl Into<String>, arg_count: usize) -> Self {
        Self {
            kind: SymbolKind::Function,
            value: value.into(),
            arg_count,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the symbol named `name`, returning the old entry.
    pub fn declare(&mut self, name: impl Into<String>, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(name.into(), symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}
