//! Typed access to persisted state.
//!
//! Decodes the raw string values of the key-value store and applies the
//! documented defaults. Malformed values never fail a read.

use std::sync::Arc;

use crate::domain::{City, LastReading};
use crate::ports::{KeyValueStore, KEY_LAST_AQI, KEY_LAST_SYMPTOMS, KEY_SELECTED_CITY};
use crate::AirsenseError;

/// Typed view over a [`KeyValueStore`].
pub struct PersistedState<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
}

impl<S> Clone for PersistedState<S>
where
    S: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> PersistedState<S>
where
    S: KeyValueStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Result<Option<String>, AirsenseError> {
        self.store
            .get(key)
            .map_err(|e| AirsenseError::Storage(e.into()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AirsenseError> {
        self.store
            .set(key, value)
            .map_err(|e| AirsenseError::Storage(e.into()))
    }

    /// Last AQI index; 1 when absent or unparsable.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn last_aqi(&self) -> Result<i64, AirsenseError> {
        let raw = self.read(KEY_LAST_AQI)?;
        Ok(raw.as_deref().map_or(1, parse_leading_int))
    }

    /// Last symptom labels; empty when absent or not a JSON string array.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn last_symptoms(&self) -> Result<Vec<String>, AirsenseError> {
        let Some(raw) = self.read(KEY_LAST_SYMPTOMS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(symptoms) => Ok(symptoms),
            Err(e) => {
                tracing::warn!("Persisted symptom list is malformed ({}); using empty list", e);
                Ok(Vec::new())
            }
        }
    }

    /// Both halves of the last reading.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn last_reading(&self) -> Result<LastReading, AirsenseError> {
        Ok(LastReading {
            aqi_index: self.last_aqi()?,
            symptoms: self.last_symptoms()?,
        })
    }

    /// # Errors
    /// Returns error if the store cannot be written.
    pub fn save_aqi(&self, aqi: i64) -> Result<(), AirsenseError> {
        self.write(KEY_LAST_AQI, &aqi.to_string())
    }

    /// # Errors
    /// Returns error if encoding or the write fails.
    pub fn save_symptoms(&self, symptoms: &[String]) -> Result<(), AirsenseError> {
        let encoded = serde_json::to_string(symptoms)?;
        self.write(KEY_LAST_SYMPTOMS, &encoded)
    }

    /// Raw `selectedCity` value, `"delhi"` when absent.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn selected_city(&self) -> Result<String, AirsenseError> {
        Ok(self
            .read(KEY_SELECTED_CITY)?
            .unwrap_or_else(|| City::Delhi.key().to_string()))
    }

    /// # Errors
    /// Returns error if the store cannot be written.
    pub fn save_selected_city(&self, city: City) -> Result<(), AirsenseError> {
        self.write(KEY_SELECTED_CITY, city.key())
    }
}

/// Leading-integer parse with a default of 1 (`"3abc"` → 3, `"x"` → 1).
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;

    fn create_state() -> (Arc<SqliteStore>, PersistedState<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let state = PersistedState::new(store.clone());
        (store, state)
    }

    #[test]
    fn test_defaults_when_absent() {
        let (_, state) = create_state();
        let last = state.last_reading().expect("Should read");
        assert_eq!(last, LastReading::default());
        assert_eq!(state.selected_city().expect("Should read"), "delhi");
    }

    #[test]
    fn test_round_trip() {
        let (_, state) = create_state();
        state.save_aqi(4).expect("Should save");
        state
            .save_symptoms(&["cough".to_string(), "wheeze".to_string()])
            .expect("Should save");

        let last = state.last_reading().expect("Should read");
        assert_eq!(last.aqi_index, 4);
        assert_eq!(last.symptoms, vec!["cough", "wheeze"]);
    }

    #[test]
    fn test_symptoms_stored_as_json() {
        let (store, state) = create_state();
        state.save_symptoms(&["cough".to_string()]).expect("Should save");
        assert_eq!(
            store.get(KEY_LAST_SYMPTOMS).expect("Should read").as_deref(),
            Some(r#"["cough"]"#)
        );
    }

    #[test]
    fn test_malformed_symptoms_default_to_empty() {
        let (store, state) = create_state();
        store.set(KEY_LAST_SYMPTOMS, "{not json").expect("Should write");
        assert!(state.last_symptoms().expect("Should read").is_empty());

        store.set(KEY_LAST_SYMPTOMS, "[1, 2]").expect("Should write");
        assert!(state.last_symptoms().expect("Should read").is_empty());
    }

    #[test]
    fn test_malformed_aqi_defaults_to_one() {
        let (store, state) = create_state();
        store.set(KEY_LAST_AQI, "abc").expect("Should write");
        assert_eq!(state.last_aqi().expect("Should read"), 1);

        store.set(KEY_LAST_AQI, "3px").expect("Should write");
        assert_eq!(state.last_aqi().expect("Should read"), 3);
    }
}
