//! The value store: per-source, per-row records of field values.

use std::collections::HashMap;

use crate::dom::Value;

use super::record::Record;

/// When a stored value gets validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Store the edit without validating.
    #[default]
    None,
    /// Store now, validate later (e.g. when the row is left).
    Delayed,
    /// Validate as part of the write; the write is rejected on failure.
    Required,
}

/// Read/write access to field values per (source, field, row).
///
/// The routing core consumes this as an external collaborator; the bundled
/// [`MemoryStore`] keeps everything in process.
pub trait ValueStore {
    /// The most recent value of a field, or [`Value::Null`] when the cell
    /// was never written.
    fn value(&self, source: &str, field: &str, row: i64) -> Value;

    /// The last accepted (validated-or-original) value of a field; what an
    /// undo restores.
    fn accepted(&self, source: &str, field: &str, row: i64) -> Value;

    /// Store a field value. Returns whether the value was accepted.
    fn set_value(
        &mut self,
        source: &str,
        field: &str,
        row: i64,
        value: Value,
        validate: Validation,
    ) -> bool;
}

/// In-memory [`ValueStore`]: source name (case-insensitive) -> row -> record.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sources: HashMap<String, Source>,
}

#[derive(Debug, Default)]
struct Source {
    records: HashMap<i64, Record>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a (source, row) cell, if any value was ever stored.
    pub fn record(&self, source: &str, row: i64) -> Option<&Record> {
        self.sources
            .get(&source.to_ascii_lowercase())
            .and_then(|s| s.records.get(&row))
    }

    /// Validate every field of a row. Returns false when the row has no
    /// record or a field fails.
    pub fn validate_row(&mut self, source: &str, row: i64) -> bool {
        self.sources
            .get_mut(&source.to_ascii_lowercase())
            .and_then(|s| s.records.get_mut(&row))
            .is_some_and(Record::validate)
    }

    fn record_mut(&mut self, source: &str, row: i64) -> &mut Record {
        self.sources
            .entry(source.to_ascii_lowercase())
            .or_default()
            .records
            .entry(row)
            .or_default()
    }
}

impl ValueStore for MemoryStore {
    fn value(&self, source: &str, field: &str, row: i64) -> Value {
        self.record(source, row)
            .and_then(|record| record.field(field))
            .map(|f| f.latest().clone())
            .unwrap_or(Value::Null)
    }

    fn accepted(&self, source: &str, field: &str, row: i64) -> Value {
        self.record(source, row)
            .and_then(|record| record.field(field))
            .map(|f| f.accepted().clone())
            .unwrap_or(Value::Null)
    }

    fn set_value(
        &mut self,
        source: &str,
        field: &str,
        row: i64,
        value: Value,
        validate: Validation,
    ) -> bool {
        let record = self.record_mut(source, row);
        record.set(field, value);
        match validate {
            Validation::None | Validation::Delayed => true,
            Validation::Required => record
                .field_mut(field)
                .is_some_and(|f| f.validate()),
        }
    }
}
