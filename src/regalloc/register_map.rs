use super::Register;
use std::collections::HashMap;

/// One-to-one mapping between registers and the variables they hold.
#[derive(Debug, Clone, Default)]
pub struct RegisterMap {
    by_register: HashMap<Register, String>,
    by_variable: HashMap<String, Register>,
}

impl RegisterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `variable` into `register`, returning the variable it displaced.
    ///
    /// A variable already held elsewhere moves; it never occupies two
    /// registers.
    pub fn bind(&mut self, register: Register, variable: impl Into<String>) -> Option<String> {
        let variable = variable.into();
        if let Some(old) = self.by_variable.remove(&variable) {
            self.by_register.remove(&old);
        }
        let displaced = self.by_register.insert(register, variable.clone());
        if let Some(displaced) = &displaced {
            self.by_variable.remove(displaced);
        }
        self.by_variable.insert(variable, register);
        displaced
    }

    pub fn release(&mut self, register: Register) -> Option<String> {
        let variable = self.by_register.remove(&register)?;
        self.by_variable.remove(&variable);
        Some(variable)
    }

    pub fn register_of(&self, variable: &str) -> Option<Register> {
        self.by_variable.get(variable).copied()
    }

    pub fn variable_in(&self, register: Register) -> Option<&str> {
        self.by_register.get(&register).map(String::as_str)
    }

    pub fn is_free(&self, register: Register) -> bool {
        !self.by_register.contains_key(&register)
    }

    pub fn len(&self) -> usize {
        self.by_register.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_register.is_empty()
    }
}
