//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite-backed key-value store
//! - `sanitize`: health-data filtering for logs

pub mod sanitize;
pub mod sqlite;

// Re-export storage error for lib.rs
pub use sqlite::StorageError;
