//! Recommendation service: Reads the last reading back out of the store.

use crate::domain::{compose, Recommendation};
use crate::ports::KeyValueStore;
use crate::AirsenseError;

use super::state::PersistedState;

/// Service for the solutions page.
pub struct RecommendationService<S>
where
    S: KeyValueStore,
{
    state: PersistedState<S>,
}

impl<S> RecommendationService<S>
where
    S: KeyValueStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    pub fn new(state: PersistedState<S>) -> Self {
        Self { state }
    }

    /// Compose a recommendation from whatever was persisted last.
    ///
    /// Missing or malformed values fall back to the defaults of
    /// [`PersistedState`], so this only fails on storage errors.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn current(&self) -> Result<Recommendation, AirsenseError> {
        let last = self.state.last_reading()?;
        tracing::debug!(aqi_index = last.aqi_index, "Composing recommendation");
        Ok(compose(last.aqi_index, &last.symptoms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::sqlite::SqliteStore;
    use crate::domain::AqiCategory;
    use crate::ports::{KEY_LAST_AQI, KEY_LAST_SYMPTOMS};

    fn create_test_service() -> (Arc<SqliteStore>, RecommendationService<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let service = RecommendationService::new(PersistedState::new(store.clone()));
        (store, service)
    }

    #[test]
    fn test_fresh_store_is_good() {
        let (_, service) = create_test_service();
        let rec = service.current().expect("Should compose");

        assert_eq!(rec.info.category, AqiCategory::Good);
        assert_eq!(rec.symptoms, "None");
        assert_eq!(rec.remark, "Air quality is good.");
    }

    #[test]
    fn test_reads_persisted_reading() {
        let (store, service) = create_test_service();
        store.set(KEY_LAST_AQI, "5").expect("Should write");
        store
            .set(KEY_LAST_SYMPTOMS, r#"["cough","wheeze"]"#)
            .expect("Should write");

        let lines = service.current().expect("Should compose").lines();
        assert_eq!(lines[0], "Your Last AQI: Very Poor");
        assert_eq!(lines[1], "Symptoms: cough, wheeze");
        assert_eq!(lines[2], "Avoid going outside.");
        assert_eq!(lines[3], "Severe health risk! Stay indoors.");
    }

    #[test]
    fn test_raw_exposure_aqi_reads_as_unknown() {
        let (store, service) = create_test_service();
        store.set(KEY_LAST_AQI, "150").expect("Should write");

        let rec = service.current().expect("Should compose");
        assert_eq!(rec.info.category, AqiCategory::Unknown);
        assert_eq!(rec.remark, "Avoid going outside.");
    }

    #[test]
    fn test_malformed_symptoms_compose_as_none() {
        let (store, service) = create_test_service();
        store.set(KEY_LAST_SYMPTOMS, "cough,wheeze").expect("Should write");

        assert_eq!(service.current().expect("Should compose").symptoms, "None");
    }
}
