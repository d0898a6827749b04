use super::Operand;
use std::collections::HashMap;

/// Bytes reserved per variable.
pub const SLOT_SIZE: i64 = 4;

/// Hands out `ebp`-relative home slots for variables.
#[derive(Debug, Default)]
pub struct Frame {
    offset: i64,
    slots: HashMap<String, i64>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `name`, reserving one on first use.
    pub fn slot(&mut self, name: &str) -> Operand {
        if let Some(&offset) = self.slots.get(name) {
            return Operand::Stack(offset);
        }
        self.offset += SLOT_SIZE;
        self.slots.insert(name.to_owned(), -self.offset);
        Operand::Stack(-self.offset)
    }

    /// Stack space the prologue has to reserve.
    pub fn size(&self) -> i64 {
        self.offset
    }
}
