//! A record: named fields for one row of a data source.

use std::collections::HashMap;

use crate::dom::Value;

use super::field::Field;

/// A record of named fields. Field names are case-insensitive and stored
/// lowercased.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: HashMap<String, Field>,
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field with an original value, replacing any existing field
    /// of the same name.
    pub fn create_field(&mut self, name: &str, value: Value) -> &mut Self {
        self.fields.insert(name.to_ascii_lowercase(), Field::new(value));
        self
    }

    /// Drop a field. No-op if absent.
    pub fn delete_field(&mut self, name: &str) -> &mut Self {
        self.fields.remove(&name.to_ascii_lowercase());
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(&name.to_ascii_lowercase())
    }

    /// Mutable field lookup.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(&name.to_ascii_lowercase())
    }

    /// Record a volatile edit, creating the field on first write.
    pub fn set(&mut self, name: &str, value: Value) {
        self.fields
            .entry(name.to_ascii_lowercase())
            .or_default()
            .set(value);
    }

    /// Validate every field. Stops at the first failure.
    pub fn validate(&mut self) -> bool {
        for field in self.fields.values_mut() {
            if !field.validate() {
                return false;
            }
        }
        true
    }

    /// Whether every field is validated.
    pub fn is_validated(&self) -> bool {
        self.fields.values().all(Field::is_validated)
    }

    /// Field names, lowercased, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
