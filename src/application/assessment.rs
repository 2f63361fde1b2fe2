//! Asthma assessment service: Runs the symptom checks.
//!
//! The exposure check (checklist + AQI) persists its inputs and logs the
//! AQI to the trend chart; it also carries a symptom-only checklist verdict.
//! The six-question check and its flare-up verdict are display-only.

use crate::domain::{
    ChecklistClassifier, City, ExposureClassifier, ExposureInput, FlareClassifier, QuestionnaireAnswers,
    QuestionnaireClassifier, RiskAssessment, RiskClassifier, HISTORY_DAYS,
};
use crate::ports::KeyValueStore;
use crate::AirsenseError;

use super::charts::ChartController;
use super::state::PersistedState;

/// Reference history shown under an exposure result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityHistory {
    /// No location entered
    NotRequested,
    /// Location matched a reference city
    Found {
        /// Location as typed, upper-cased
        heading: String,
        days: [u32; HISTORY_DAYS],
    },
    /// Location entered but not in the reference table
    Missing { query: String },
}

impl CityHistory {
    fn lookup(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Self::NotRequested;
        }

        match City::parse(trimmed) {
            Some(city) => Self::Found {
                heading: trimmed.to_uppercase(),
                days: city.recent_history(),
            },
            None => Self::Missing {
                query: trimmed.to_string(),
            },
        }
    }

    /// Message for a location with no reference data.
    #[must_use]
    pub fn missing_message(query: &str) -> String {
        format!("No historical data for \"{query}\". Try Delhi, Lucknow, or Mumbai.")
    }
}

/// Result of an exposure check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureReport {
    pub assessment: RiskAssessment,
    /// Verdict from the checked symptoms alone
    pub checklist: RiskAssessment,
    /// Location as entered, or `N/A`
    pub location: String,
    /// AQI value as displayed (`0` for missing input)
    pub aqi: i64,
    pub history: CityHistory,
    /// Time label the reading was logged under
    pub logged_at: String,
}

/// Service for asthma risk checks.
pub struct AssessmentService<S>
where
    S: KeyValueStore,
{
    exposure: ExposureClassifier,
    questionnaire: QuestionnaireClassifier,
    checklist: ChecklistClassifier,
    flare: FlareClassifier,
    state: PersistedState<S>,
}

impl<S> AssessmentService<S>
where
    S: KeyValueStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a service with the default rule sets.
    pub fn new(state: PersistedState<S>) -> Self {
        Self::with_classifiers(state, ExposureClassifier::default(), QuestionnaireClassifier::default())
    }

    pub fn with_classifiers(
        state: PersistedState<S>,
        exposure: ExposureClassifier,
        questionnaire: QuestionnaireClassifier,
    ) -> Self {
        Self {
            exposure,
            questionnaire,
            checklist: ChecklistClassifier::default(),
            flare: FlareClassifier::default(),
            state,
        }
    }

    /// Replace the symptom-only rule sets.
    #[must_use]
    pub fn with_secondary(mut self, checklist: ChecklistClassifier, flare: FlareClassifier) -> Self {
        self.checklist = checklist;
        self.flare = flare;
        self
    }

    /// Run the exposure check, logging the reading under the current local time.
    ///
    /// # Errors
    /// Returns error if persisting the reading fails.
    pub fn check_exposure(
        &self,
        input: &ExposureInput,
        charts: &mut ChartController,
    ) -> Result<ExposureReport, AirsenseError> {
        let label = chrono::Local::now().format("%H:%M").to_string();
        self.check_exposure_at(input, label, charts)
    }

    /// Run the exposure check with an explicit time label.
    ///
    /// Classifies, persists the AQI and symptom labels, appends the AQI to
    /// the history chart, and looks up reference history for the location.
    ///
    /// # Errors
    /// Returns error if persisting the reading fails.
    pub fn check_exposure_at(
        &self,
        input: &ExposureInput,
        label: impl Into<String>,
        charts: &mut ChartController,
    ) -> Result<ExposureReport, AirsenseError> {
        let assessment = self.exposure.classify(input);
        let checklist = self.checklist.classify(input);
        let logged_at = label.into();

        self.state.save_aqi(input.aqi)?;
        self.state.save_symptoms(&input.symptom_labels())?;
        charts.record_reading(logged_at.clone(), input.aqi);

        let location = if input.location.trim().is_empty() {
            "N/A".to_string()
        } else {
            input.location.clone()
        };

        tracing::info!(
            tier = %assessment.tier,
            checklist = %checklist.tier,
            aqi = input.aqi,
            checked = input.checked_count(),
            "Exposure check complete"
        );

        Ok(ExposureReport {
            assessment,
            checklist,
            location,
            aqi: input.aqi,
            history: CityHistory::lookup(&input.location),
            logged_at,
        })
    }

    /// Run the six-question check. Nothing is persisted.
    #[must_use]
    pub fn check_questionnaire(&self, answers: &QuestionnaireAnswers) -> RiskAssessment {
        let assessment = self.questionnaire.classify(answers);
        tracing::info!(tier = %assessment.tier, "Questionnaire check complete");
        assessment
    }

    /// Flare-up verdict for the same six answers. Nothing is persisted.
    #[must_use]
    pub fn check_flare(&self, answers: &QuestionnaireAnswers) -> RiskAssessment {
        let assessment = self.flare.classify(answers);
        tracing::info!(tier = %assessment.tier, "Flare check complete");
        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::sqlite::SqliteStore;
    use crate::domain::{FlareRules, Page, Question, RiskTier, SeverityLevel, Symptom};

    fn create_test_service() -> (PersistedState<SqliteStore>, AssessmentService<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let state = PersistedState::new(store);
        (state.clone(), AssessmentService::new(state))
    }

    #[test]
    fn test_exposure_persists_and_logs() {
        let (state, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Asthma);

        let input = ExposureInput::new([Symptom::Cough, Symptom::Wheeze], 150, "Delhi");
        let report = service
            .check_exposure_at(&input, "09:30", &mut charts)
            .expect("Should check");

        assert_eq!(report.assessment.tier, RiskTier::Moderate);
        assert_eq!(report.checklist.label, "Medium");
        assert_eq!(report.location, "Delhi");
        assert_eq!(
            report.history,
            CityHistory::Found {
                heading: "DELHI".to_string(),
                days: [310, 285, 340],
            }
        );

        let last = state.last_reading().expect("Should read");
        assert_eq!(last.aqi_index, 150);
        assert_eq!(last.symptoms, vec!["cough", "wheeze"]);

        let points = charts.history().expect("history").points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, "09:30");
        assert_eq!(points[0].value, 150.0);
    }

    #[test]
    fn test_exposure_blank_location() {
        let (_, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Asthma);

        let input = ExposureInput::new(Vec::<Symptom>::new(), 0, "   ");
        let report = service
            .check_exposure_at(&input, "10:00", &mut charts)
            .expect("Should check");

        assert_eq!(report.assessment.tier, RiskTier::Low);
        assert_eq!(report.location, "N/A");
        assert_eq!(report.history, CityHistory::NotRequested);
    }

    #[test]
    fn test_exposure_unknown_location() {
        let (_, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Asthma);

        let input = ExposureInput::new(Vec::<Symptom>::new(), 250, "Paris");
        let report = service
            .check_exposure_at(&input, "10:00", &mut charts)
            .expect("Should check");

        assert_eq!(report.assessment.tier, RiskTier::High);
        assert_eq!(report.checklist.tier, RiskTier::Low);
        assert_eq!(
            report.history,
            CityHistory::Missing {
                query: "Paris".to_string()
            }
        );
        assert!(CityHistory::missing_message("Paris").contains("Try Delhi, Lucknow, or Mumbai."));
    }

    #[test]
    fn test_questionnaire_does_not_persist() {
        let (state, service) = create_test_service();

        let mut answers = QuestionnaireAnswers::default();
        answers.set(Question::Wheeze, SeverityLevel::Severe);
        let result = service.check_questionnaire(&answers);

        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(state.last_reading().expect("Should read"), Default::default());
    }

    #[test]
    fn test_checklist_verdict_flags_shortness() {
        let (_, service) = create_test_service();
        let mut charts = ChartController::for_page(Page::Asthma);

        let input = ExposureInput::new([Symptom::Shortness], 40, "");
        let report = service
            .check_exposure_at(&input, "11:00", &mut charts)
            .expect("Should check");

        assert_eq!(report.assessment.tier, RiskTier::Low);
        assert_eq!(report.checklist.tier, RiskTier::High);
        assert_eq!(report.checklist.label, "HIGH (Severe)");
    }

    #[test]
    fn test_flare_check_with_custom_rules() {
        let (state, service) = create_test_service();

        let mut answers = QuestionnaireAnswers::default();
        answers.set(Question::Breath, SeverityLevel::Severe);
        assert_eq!(service.check_flare(&answers).tier, RiskTier::Low);

        let service = service.with_secondary(
            ChecklistClassifier::default(),
            FlareClassifier::new(FlareRules {
                severe_at_least: 1,
                ..FlareRules::default()
            }),
        );
        assert_eq!(service.check_flare(&answers).label, "Severe Asthma Flare-Up");
        assert_eq!(state.last_reading().expect("Should read"), Default::default());
    }
}
