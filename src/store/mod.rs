//! Field persistence
//!
//! An async key-value store of string fields and the write-through / batch-read
//! policy the calculator forms use on top of it.

pub mod field_store;
pub mod persistence;

pub use field_store::{FieldStore, MemoryFieldStore, SqliteFieldStore, StoreError, StoreResult};
pub use persistence::FieldPersistence;
