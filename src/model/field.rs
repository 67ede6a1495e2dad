//! A single field's value history.

use crate::dom::Value;

/// Value history for one named field: the original value as loaded, the
/// latest validated value, and the volatile (unvalidated) edit.
#[derive(Debug, Clone, Default)]
pub struct Field {
    original: Value,
    validated: Value,
    volatile: Value,
    is_validated: bool,
}

impl Field {
    /// Create a field with an original value and no edits.
    pub fn new(original: Value) -> Self {
        Self {
            original,
            validated: Value::Null,
            volatile: Value::Null,
            is_validated: false,
        }
    }

    /// The value as loaded.
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The latest validated value.
    pub fn validated(&self) -> &Value {
        &self.validated
    }

    /// The volatile (unvalidated) edit, if any.
    pub fn volatile(&self) -> &Value {
        &self.volatile
    }

    /// The most recent value: the volatile edit when present, else the
    /// validated value, else the original.
    pub fn latest(&self) -> &Value {
        if !self.volatile.is_null() {
            &self.volatile
        } else if !self.validated.is_null() {
            &self.validated
        } else {
            &self.original
        }
    }

    /// The last accepted value: validated when validation has run, else the
    /// original. This is what an undo restores.
    pub fn accepted(&self) -> &Value {
        if self.is_validated {
            &self.validated
        } else {
            &self.original
        }
    }

    /// Record a volatile edit. Clears the validated flag.
    pub fn set(&mut self, value: Value) {
        self.volatile = value;
        self.is_validated = false;
    }

    /// Replace the original value, wiping the edit history.
    pub fn set_original(&mut self, value: Value) {
        self.original = value;
        self.validated = Value::Null;
        self.volatile = Value::Null;
        self.is_validated = false;
    }

    /// Promote the latest value to validated and mark the field validated.
    pub fn validate(&mut self) -> bool {
        self.validated = self.latest().clone();
        self.volatile = Value::Null;
        self.is_validated = true;
        true
    }

    /// Whether the field's latest value has been validated.
    pub fn is_validated(&self) -> bool {
        self.is_validated
    }
}
