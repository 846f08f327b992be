//! Data models
//!
//! Rust structs representing database entities.

mod field;

pub use field::PersistedField;
