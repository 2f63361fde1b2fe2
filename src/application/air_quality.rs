//! Air-quality service: City lookups against the reference tables.

use crate::domain::{categorize, normalize, AqiInfo, City, PollutantProfile, PollutionBreakdown};
use crate::ports::KeyValueStore;
use crate::AirsenseError;

use super::charts::ChartController;
use super::state::PersistedState;

/// Outcome of a city lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    /// Nothing was entered
    EmptyQuery,
    /// Entered text matched no city; carries the user-facing message
    NotFound(String),
}

impl<T> Lookup<T> {
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            _ => None,
        }
    }
}

const STATION_NOT_FOUND: &str = "City not found in manual database. Available: Delhi, Lucknow, Shillong.";
const PROFILE_NOT_FOUND: &str = "City not found!";

/// Home-page station report.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub city: City,
    /// Query as typed, upper-cased
    pub heading: String,
    pub aqi_index: i64,
    pub info: AqiInfo,
    pub pm25: u32,
    pub pm10: u32,
    pub lat: f64,
    pub lon: f64,
}

/// Search result with the city's pollutant profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CityProfile {
    pub city: City,
    pub profile: PollutantProfile,
}

/// Tools-page instant reading.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantAqi {
    pub heading: String,
    pub aqi_index: i64,
    pub info: AqiInfo,
}

/// Service for city air-quality lookups.
pub struct AirQualityService<S>
where
    S: KeyValueStore,
{
    state: PersistedState<S>,
}

impl<S> AirQualityService<S>
where
    S: KeyValueStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    pub fn new(state: PersistedState<S>) -> Self {
        Self { state }
    }

    /// Look up a station reading and remember its index as the last AQI.
    ///
    /// Failed lookups persist nothing.
    ///
    /// # Errors
    /// Returns error if persisting the index fails.
    pub fn fetch_station(&self, query: &str) -> Result<Lookup<StationReport>, AirsenseError> {
        let key = normalize(query);
        if key.is_empty() {
            return Ok(Lookup::EmptyQuery);
        }

        let Some((city, station)) = City::parse(&key).and_then(|c| c.station().map(|s| (c, s))) else {
            tracing::debug!("Station lookup missed");
            return Ok(Lookup::NotFound(STATION_NOT_FOUND.to_string()));
        };

        self.state.save_aqi(station.aqi_index)?;
        tracing::info!(city = city.key(), aqi_index = station.aqi_index, "Station lookup");

        Ok(Lookup::Found(StationReport {
            city,
            heading: key.to_uppercase(),
            aqi_index: station.aqi_index,
            info: categorize(station.aqi_index),
            pm25: station.pm25,
            pm10: station.pm10,
            lat: station.lat,
            lon: station.lon,
        }))
    }

    /// Search the pollutant table and show the result on the radar chart.
    ///
    /// A non-empty `selected` value takes precedence over `typed`.
    #[must_use]
    pub fn search_city(&self, typed: &str, selected: Option<&str>, charts: &mut ChartController) -> Lookup<CityProfile> {
        let chosen = match selected.map(normalize) {
            Some(s) if !s.is_empty() => s,
            _ => normalize(typed),
        };
        if chosen.is_empty() {
            return Lookup::NotFound(PROFILE_NOT_FOUND.to_string());
        }

        match City::parse(&chosen).and_then(|c| c.pollutants().map(|p| (c, p))) {
            Some((city, profile)) => {
                charts.show_pollutants(city, &profile);
                Lookup::Found(CityProfile { city, profile })
            }
            None => Lookup::NotFound(PROFILE_NOT_FOUND.to_string()),
        }
    }

    /// Station index and category without touching persisted state.
    #[must_use]
    pub fn instant_aqi(&self, query: &str) -> Lookup<InstantAqi> {
        let key = normalize(query);
        match City::parse(&key).and_then(|c| c.station()) {
            Some(station) => Lookup::Found(InstantAqi {
                heading: key.to_uppercase(),
                aqi_index: station.aqi_index,
                info: categorize(station.aqi_index),
            }),
            None => Lookup::NotFound("City not found in manual database.".to_string()),
        }
    }

    /// Remember the city shown on the pollution page.
    ///
    /// # Errors
    /// Returns error if persisting fails.
    pub fn select_city(&self, city: City) -> Result<(), AirsenseError> {
        self.state.save_selected_city(city)
    }

    /// Breakdown for the selected city, falling back to Delhi when the
    /// stored value has no breakdown.
    ///
    /// # Errors
    /// Returns error if reading persisted state fails.
    pub fn pollution_breakdown(&self, charts: &mut ChartController) -> Result<(City, PollutionBreakdown), AirsenseError> {
        let stored = self.state.selected_city()?;
        let (city, breakdown) = City::parse(&stored)
            .and_then(|c| c.breakdown().map(|b| (c, b)))
            .or_else(|| {
                tracing::warn!("Selected city has no breakdown; showing Delhi");
                City::Delhi.breakdown().map(|b| (City::Delhi, b))
            })
            .ok_or_else(|| AirsenseError::Validation("No pollution breakdown available".to_string()))?;

        charts.show_breakdown(city, &breakdown);
        Ok((city, breakdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::sqlite::SqliteStore;
    use crate::domain::{AqiCategory, Page};
    use crate::ports::KEY_SELECTED_CITY;

    fn create_test_service() -> (Arc<SqliteStore>, PersistedState<SqliteStore>, AirQualityService<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let state = PersistedState::new(store.clone());
        (store, state.clone(), AirQualityService::new(state))
    }

    #[test]
    fn test_fetch_station_persists_index() {
        let (_, state, service) = create_test_service();

        let report = service
            .fetch_station(" Lucknow ")
            .expect("Should look up")
            .found()
            .expect("Lucknow exists");

        assert_eq!(report.heading, "LUCKNOW");
        assert_eq!(report.info.category, AqiCategory::Poor);
        assert_eq!(report.pm25, 150);
        assert_eq!(state.last_aqi().expect("Should read"), 4);
    }

    #[test]
    fn test_fetch_station_failures_do_not_persist() {
        let (_, state, service) = create_test_service();
        state.save_aqi(2).expect("Should save");

        assert_eq!(service.fetch_station("   ").expect("ok"), Lookup::EmptyQuery);
        assert!(matches!(
            service.fetch_station("Mumbai").expect("ok"),
            Lookup::NotFound(msg) if msg.contains("Available: Delhi, Lucknow, Shillong.")
        ));
        assert_eq!(state.last_aqi().expect("Should read"), 2);
    }

    #[test]
    fn test_search_prefers_selection() {
        let (_, _, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Home);

        let found = service
            .search_city("delhi", Some("shillong"), &mut charts)
            .found()
            .expect("Shillong exists");
        assert_eq!(found.city, City::Shillong);
        assert_eq!(found.profile.aqi, 70);
        assert_eq!(charts.radar().map(|r| r.title.as_str()), Some("Shillong Pollutants"));
    }

    #[test]
    fn test_search_falls_back_to_typed() {
        let (_, _, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Home);

        let found = service.search_city("Delhi", Some(""), &mut charts).found();
        assert_eq!(found.map(|f| f.city), Some(City::Delhi));
        assert_eq!(
            service.search_city("atlantis", None, &mut charts),
            Lookup::NotFound("City not found!".to_string())
        );
    }

    #[test]
    fn test_instant_aqi() {
        let (_, state, service) = create_test_service();

        let instant = service.instant_aqi("shillong").found().expect("exists");
        assert_eq!(instant.aqi_index, 2);
        assert_eq!(instant.info.color, "#ffff00");
        assert!(matches!(service.instant_aqi("nowhere"), Lookup::NotFound(_)));
        assert_eq!(state.last_aqi().expect("Should read"), 1);
    }

    #[test]
    fn test_breakdown_uses_selected_city() {
        let (store, _, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::AirPollution);

        let (city, _) = service.pollution_breakdown(&mut charts).expect("Should load");
        assert_eq!(city, City::Delhi);

        service.select_city(City::Lucknow).expect("Should save");
        let (city, breakdown) = service.pollution_breakdown(&mut charts).expect("Should load");
        assert_eq!(city, City::Lucknow);
        assert_eq!(breakdown.pm25, 95);

        store.set(KEY_SELECTED_CITY, "mumbai").expect("Should write");
        let (city, _) = service.pollution_breakdown(&mut charts).expect("Should load");
        assert_eq!(city, City::Delhi);
    }
}
