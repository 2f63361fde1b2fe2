//! Domain layer: Core types and rules.
//!
//! Pure Rust with no I/O. Every lookup here is total: unknown input maps
//! to a fallback value instead of an error.

mod aqi;
mod city;
mod classifier;
mod history;
mod page;
mod recommendation;
mod risk;
mod symptoms;

pub use aqi::{categorize, AqiBand, AqiCategory, AqiInfo, AQI_SCALE};
pub use city::{normalize, City, PollutantProfile, PollutionBreakdown, StationReading, HISTORY_DAYS};
pub use classifier::{
    ChecklistClassifier, ChecklistRules, ExposureClassifier, ExposureRules, FlareClassifier, FlareRules,
    QuestionnaireClassifier, QuestionnaireRules, RiskClassifier,
};
pub use history::{HistoryBuffer, HistoryPoint, HISTORY_CAPACITY};
pub use page::Page;
pub use recommendation::{compose, LastReading, Recommendation};
pub use risk::{RiskAssessment, RiskTier};
pub use symptoms::{parse_aqi_field, ExposureInput, Question, QuestionnaireAnswers, SeverityLevel, Symptom};
