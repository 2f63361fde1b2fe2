//! SQLite adapter: Implementation of KeyValueStore.
//!
//! Persists the last reading in a single `kv` table so it survives
//! restarts of the terminal app.
//!
//! # Mutex Behavior
//!
//! The connection is protected by a `Mutex`. A poisoned mutex (from a panic
//! in another thread) surfaces as [`StorageError::LockPoisoned`] instead of
//! panicking the UI thread.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::ports::KeyValueStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// SQLite key-value store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let conn = self.lock()?;

        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let conn = self.lock()?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;

        tracing::debug!(key, "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let store = SqliteStore::in_memory().expect("Should create db");
        assert!(store.get("lastAqi").expect("Should read").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = SqliteStore::in_memory().expect("Should create db");

        store.set("lastAqi", "3").expect("Should write");
        store.set("lastAqi", "5").expect("Should write");

        assert_eq!(store.get("lastAqi").expect("Should read").as_deref(), Some("5"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("airsense.db");

        {
            let store = SqliteStore::new(&path).expect("Should open");
            store.set("selectedCity", "lucknow").expect("Should write");
        }

        let reopened = SqliteStore::new(&path).expect("Should reopen");
        assert_eq!(
            reopened.get("selectedCity").expect("Should read").as_deref(),
            Some("lucknow")
        );
    }
}
