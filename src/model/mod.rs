//! Field/record value-history storage.

pub mod field;
pub mod record;
pub mod store;

pub use field::Field;
pub use record::Record;
pub use store::{MemoryStore, Validation, ValueStore};
