//! Application layer: Use cases and services.
//!
//! Services wrap a [`PersistedState`] over any [`crate::ports::KeyValueStore`]
//! and push chart updates through a [`ChartController`].

mod air_quality;
mod assessment;
mod charts;
mod recommendations;
mod state;

pub use air_quality::{AirQualityService, CityProfile, InstantAqi, Lookup, StationReport};
pub use assessment::{AssessmentService, CityHistory, ExposureReport};
pub use charts::{Bar, BarSeries, ChartController, ChartKind, HistoryChart};
pub use recommendations::RecommendationService;
pub use state::PersistedState;
