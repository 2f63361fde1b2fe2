//! Key-value store port: Persistence surface for the last reading.
//!
//! The application only needs string-keyed scalars that survive restarts.
//! Values are stored verbatim; decoding and defaults live in the
//! application layer.

/// Key for the last AQI index (stringified integer).
pub const KEY_LAST_AQI: &str = "lastAqi";

/// Key for the last symptom labels (JSON array of strings).
pub const KEY_LAST_SYMPTOMS: &str = "lastSymptoms";

/// Key for the city shown on the pollution page.
pub const KEY_SELECTED_CITY: &str = "selectedCity";

/// Trait for local key-value persistence.
///
/// Writes are last-write-wins; there is no expiry.
pub trait KeyValueStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a value.
    ///
    /// # Returns
    /// `None` if the key has never been written.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}
