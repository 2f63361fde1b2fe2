//! Rule-based asthma risk classifiers.
//!
//! Four independent rule sets produce the same [`RiskAssessment`] shape:
//! - [`ExposureClassifier`]: checked-symptom count plus a numeric AQI value
//! - [`ChecklistClassifier`]: checked symptoms only, one of them critical
//! - [`QuestionnaireClassifier`]: six severity answers, AQI not consulted
//! - [`FlareClassifier`]: the same answers, counted for a flare-up verdict
//!
//! Rules are evaluated top-down and the first match wins.

use serde::{Deserialize, Serialize};

use super::risk::{RiskAssessment, RiskTier};
use super::symptoms::{ExposureInput, QuestionnaireAnswers, SeverityLevel, Symptom};

/// A strategy mapping some symptom profile to a risk assessment.
pub trait RiskClassifier {
    /// Symptom profile consumed by this strategy.
    type Input;

    /// Classify a profile. Pure: equal inputs give equal outputs.
    fn classify(&self, input: &Self::Input) -> RiskAssessment;
}

/// Thresholds for the checkbox/AQI rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureRules {
    /// Checked symptoms at or above this count are high risk
    pub high_symptom_count: usize,
    /// AQI strictly above this value is high risk
    pub high_aqi_above: i64,
    pub moderate_symptom_count: usize,
    pub moderate_aqi_above: i64,
}

impl Default for ExposureRules {
    fn default() -> Self {
        Self {
            high_symptom_count: 3,
            high_aqi_above: 200,
            moderate_symptom_count: 2,
            moderate_aqi_above: 100,
        }
    }
}

/// Checkbox/AQI classifier used by the exposure check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExposureClassifier {
    rules: ExposureRules,
}

impl ExposureClassifier {
    #[must_use]
    pub fn new(rules: ExposureRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &ExposureRules {
        &self.rules
    }

    /// Classify from the raw checked count and AQI value.
    #[must_use]
    pub fn assess(&self, checked_count: usize, aqi: i64) -> RiskAssessment {
        let r = &self.rules;

        if checked_count >= r.high_symptom_count || aqi > r.high_aqi_above {
            RiskAssessment::new(
                RiskTier::High,
                "High Risk / Action Required",
                "#d32f2f",
                "Immediate Action: High symptoms or hazardous air. Use rescue inhaler and stay indoors.",
            )
        } else if checked_count >= r.moderate_symptom_count || aqi > r.moderate_aqi_above {
            RiskAssessment::new(
                RiskTier::Moderate,
                "Moderate / Caution",
                "#f57c00",
                "Monitor: You are experiencing multiple symptoms or air quality is poor. Limit heavy outdoor activity.",
            )
        } else {
            RiskAssessment::new(
                RiskTier::Low,
                "Low / Healthy",
                "#388e3c",
                "Stable: Your symptoms are minimal and air quality is acceptable.",
            )
        }
    }
}

impl RiskClassifier for ExposureClassifier {
    type Input = ExposureInput;

    fn classify(&self, input: &ExposureInput) -> RiskAssessment {
        self.assess(input.checked_count(), input.aqi)
    }
}

/// Thresholds for the six-question rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireRules {
    /// Mild answers strictly above this count are high risk.
    ///
    /// With six questions the default of 6 can never trigger; severe
    /// answers are the only route to high risk.
    pub high_mild_above: usize,
    pub moderate_mild_at_least: usize,
}

impl Default for QuestionnaireRules {
    fn default() -> Self {
        Self {
            high_mild_above: 6,
            moderate_mild_at_least: 4,
        }
    }
}

/// Six-question severity classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionnaireClassifier {
    rules: QuestionnaireRules,
}

impl QuestionnaireClassifier {
    #[must_use]
    pub fn new(rules: QuestionnaireRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &QuestionnaireRules {
        &self.rules
    }
}

impl RiskClassifier for QuestionnaireClassifier {
    type Input = QuestionnaireAnswers;

    fn classify(&self, answers: &QuestionnaireAnswers) -> RiskAssessment {
        let mild_count = answers.count(SeverityLevel::Mild);
        let is_emergency = answers.any_severe();

        if is_emergency || mild_count > self.rules.high_mild_above {
            let detail = if mild_count > 2 {
                "Multiple moderate symptoms detected."
            } else {
                "Severe symptoms detected."
            };
            RiskAssessment::new(
                RiskTier::High,
                "High Risk / Action Required",
                "#d32f2f",
                format!(
                    "Significant Doctor Concern: {detail} You must consult your doctor immediately. \
                     Use your rescue inhaler and limit activity."
                ),
            )
        } else if mild_count >= self.rules.moderate_mild_at_least {
            RiskAssessment::new(
                RiskTier::Moderate,
                "Moderate Risk / Caution",
                "#ff9800",
                "You are showing a few mild symptoms. Monitor your breathing closely and rest.",
            )
        } else {
            let advice = if mild_count == 1 {
                "A single mild symptom detected. Keep an eye on it, but you are currently stable."
            } else {
                "Your symptoms are currently under control. Continue your regular plan."
            };
            RiskAssessment::new(RiskTier::Low, "Low Risk / Stable", "#2e7d32", advice)
        }
    }
}

/// Thresholds for the symptom-only checklist verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistRules {
    pub high_symptom_count: usize,
    pub moderate_symptom_count: usize,
    /// Checking this symptom alone is high risk
    pub critical: Symptom,
}

impl Default for ChecklistRules {
    fn default() -> Self {
        Self {
            high_symptom_count: 3,
            moderate_symptom_count: 1,
            critical: Symptom::Shortness,
        }
    }
}

/// Checklist classifier: ignores AQI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistClassifier {
    rules: ChecklistRules,
}

impl ChecklistClassifier {
    #[must_use]
    pub fn new(rules: ChecklistRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &ChecklistRules {
        &self.rules
    }
}

impl RiskClassifier for ChecklistClassifier {
    type Input = ExposureInput;

    fn classify(&self, input: &ExposureInput) -> RiskAssessment {
        let r = &self.rules;
        let count = input.checked_count();

        if count >= r.high_symptom_count || input.symptoms().contains(&r.critical) {
            RiskAssessment::new(
                RiskTier::High,
                "HIGH (Severe)",
                "#d32f2f",
                "Severe symptoms checked. Use your rescue inhaler now.",
            )
        } else if count >= r.moderate_symptom_count {
            RiskAssessment::new(
                RiskTier::Moderate,
                "Medium",
                "#f57c00",
                "Some symptoms checked. Keep your inhaler nearby.",
            )
        } else {
            RiskAssessment::new(RiskTier::Low, "Low", "#388e3c", "No symptoms checked.")
        }
    }
}

/// Thresholds for the flare-up verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareRules {
    pub severe_at_least: usize,
    pub mild_at_least: usize,
}

impl Default for FlareRules {
    fn default() -> Self {
        Self {
            severe_at_least: 2,
            mild_at_least: 2,
        }
    }
}

/// Flare-up classifier over the six questionnaire answers.
///
/// Unlike [`QuestionnaireClassifier`], one severe answer is not enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlareClassifier {
    rules: FlareRules,
}

impl FlareClassifier {
    #[must_use]
    pub fn new(rules: FlareRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &FlareRules {
        &self.rules
    }
}

impl RiskClassifier for FlareClassifier {
    type Input = QuestionnaireAnswers;

    fn classify(&self, answers: &QuestionnaireAnswers) -> RiskAssessment {
        if answers.count(SeverityLevel::Severe) >= self.rules.severe_at_least {
            RiskAssessment::new(
                RiskTier::High,
                "Severe Asthma Flare-Up",
                "#ffcccc",
                "Your symptoms suggest a strong flare-up. Use inhaler immediately. Seek medical help if needed.",
            )
        } else if answers.count(SeverityLevel::Mild) >= self.rules.mild_at_least {
            RiskAssessment::new(
                RiskTier::Moderate,
                "Moderate Symptoms",
                "#fff3cd",
                "You may be having worsening symptoms. Rest and monitor breathing.",
            )
        } else {
            RiskAssessment::new(RiskTier::Low, "Mild / No Symptoms", "#d4edda", "Breathing looks stable.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::symptoms::{parse_aqi_field, Question, Symptom};

    fn exposure(count: usize, aqi: i64) -> RiskTier {
        ExposureClassifier::default().assess(count, aqi).tier
    }

    fn answers_with(levels: &[(Question, SeverityLevel)]) -> QuestionnaireAnswers {
        let mut answers = QuestionnaireAnswers::default();
        for &(q, l) in levels {
            answers.set(q, l);
        }
        answers
    }

    #[test]
    fn test_exposure_tiers() {
        assert_eq!(exposure(0, 50), RiskTier::Low);
        assert_eq!(exposure(2, 0), RiskTier::Moderate);
        assert_eq!(exposure(0, 150), RiskTier::Moderate);
        assert_eq!(exposure(3, 0), RiskTier::High);
        assert_eq!(exposure(0, 250), RiskTier::High);
    }

    #[test]
    fn test_exposure_aqi_boundaries() {
        assert_eq!(exposure(0, 100), RiskTier::Low);
        assert_eq!(exposure(0, 101), RiskTier::Moderate);
        assert_eq!(exposure(0, 200), RiskTier::Moderate);
        assert_eq!(exposure(0, 201), RiskTier::High);
    }

    #[test]
    fn test_exposure_outputs() {
        let high = ExposureClassifier::default().assess(4, 0);
        assert_eq!(high.color, "#d32f2f");
        assert_eq!(high.width_percent, 100);
        assert!(high.emergency);

        let low = ExposureClassifier::default().assess(1, 10);
        assert_eq!(low.label, "Low / Healthy");
        assert_eq!(low.color, "#388e3c");
        assert_eq!(low.width_percent, 15);
    }

    #[test]
    fn test_exposure_via_trait() {
        let input = ExposureInput::new([Symptom::Cough, Symptom::Wheeze], 20, "");
        let classifier = ExposureClassifier::default();
        assert_eq!(classifier.classify(&input).tier, RiskTier::Moderate);
    }

    #[test]
    fn test_exposure_huge_typed_aqi_is_high() {
        let aqi = parse_aqi_field("99999999999999999999");
        assert_eq!(exposure(0, aqi), RiskTier::High);
    }

    #[test]
    fn test_exposure_custom_rules() {
        let classifier = ExposureClassifier::new(ExposureRules {
            high_aqi_above: 150,
            ..ExposureRules::default()
        });
        assert_eq!(classifier.assess(0, 151).tier, RiskTier::High);
    }

    #[test]
    fn test_questionnaire_all_none_is_low() {
        let result = QuestionnaireClassifier::default().classify(&QuestionnaireAnswers::default());
        assert_eq!(result.tier, RiskTier::Low);
        assert!(result.advice.contains("currently under control"));
    }

    #[test]
    fn test_questionnaire_single_mild_is_low() {
        let answers = answers_with(&[(Question::Cough, SeverityLevel::Mild)]);
        let result = QuestionnaireClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::Low);
        assert!(result.advice.contains("single mild symptom"));
    }

    #[test]
    fn test_questionnaire_two_or_three_mild_is_low() {
        let answers = answers_with(&[
            (Question::Cough, SeverityLevel::Mild),
            (Question::Chest, SeverityLevel::Mild),
            (Question::Wheeze, SeverityLevel::Mild),
        ]);
        let result = QuestionnaireClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::Low);
        assert!(result.advice.contains("currently under control"));
    }

    #[test]
    fn test_questionnaire_four_mild_is_moderate() {
        let answers = answers_with(&[
            (Question::Breath, SeverityLevel::Mild),
            (Question::Cough, SeverityLevel::Mild),
            (Question::Chest, SeverityLevel::Mild),
            (Question::Wheeze, SeverityLevel::Mild),
        ]);
        let result = QuestionnaireClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::Moderate);
        assert_eq!(result.color, "#ff9800");
    }

    #[test]
    fn test_questionnaire_all_mild_is_moderate() {
        // mild_count > 6 cannot hold with six questions; the high branch is dead for mild-only input.
        let answers = QuestionnaireAnswers::new([SeverityLevel::Mild; 6]);
        let result = QuestionnaireClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::Moderate);
    }

    #[test]
    fn test_questionnaire_any_severe_is_high() {
        for question in Question::ALL {
            let answers = answers_with(&[(question, SeverityLevel::Severe)]);
            let result = QuestionnaireClassifier::default().classify(&answers);
            assert_eq!(result.tier, RiskTier::High);
            assert!(result.advice.contains("Severe symptoms detected."));
        }
    }

    #[test]
    fn test_questionnaire_severe_with_many_mild() {
        let answers = answers_with(&[
            (Question::Breath, SeverityLevel::Severe),
            (Question::Cough, SeverityLevel::Mild),
            (Question::Chest, SeverityLevel::Mild),
            (Question::Wheeze, SeverityLevel::Mild),
        ]);
        let result = QuestionnaireClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::High);
        assert!(result.advice.contains("Multiple moderate symptoms detected."));
    }

    #[test]
    fn test_classifiers_are_pure() {
        let answers = answers_with(&[(Question::Inhaler, SeverityLevel::Mild)]);
        let q = QuestionnaireClassifier::default();
        assert_eq!(q.classify(&answers), q.classify(&answers));

        let e = ExposureClassifier::default();
        assert_eq!(e.assess(2, 120), e.assess(2, 120));
    }

    #[test]
    fn test_rules_deserialize_with_defaults() {
        let rules: ExposureRules =
            serde_json::from_str(r#"{"high_aqi_above": 300}"#).expect("Should parse");
        assert_eq!(rules.high_aqi_above, 300);
        assert_eq!(rules.high_symptom_count, 3);
    }

    #[test]
    fn test_checklist_tiers() {
        let classifier = ChecklistClassifier::default();
        let tier = |symptoms: &[Symptom]| {
            classifier
                .classify(&ExposureInput::new(symptoms.iter().copied(), 500, ""))
                .tier
        };

        // AQI is not consulted.
        assert_eq!(tier(&[]), RiskTier::Low);
        assert_eq!(tier(&[Symptom::Cough]), RiskTier::Moderate);
        assert_eq!(tier(&[Symptom::Cough, Symptom::Wheeze]), RiskTier::Moderate);
        assert_eq!(
            tier(&[Symptom::Cough, Symptom::Wheeze, Symptom::NightWaking]),
            RiskTier::High
        );
        assert_eq!(tier(&[Symptom::Shortness]), RiskTier::High);
    }

    #[test]
    fn test_checklist_labels_and_custom_critical() {
        let high = ChecklistClassifier::default()
            .classify(&ExposureInput::new([Symptom::Shortness], 0, ""));
        assert_eq!(high.label, "HIGH (Severe)");
        assert!(high.emergency);

        let classifier = ChecklistClassifier::new(ChecklistRules {
            critical: Symptom::ChestTightness,
            ..ChecklistRules::default()
        });
        let result = classifier.classify(&ExposureInput::new([Symptom::Shortness], 0, ""));
        assert_eq!(result.label, "Medium");
        let result = classifier.classify(&ExposureInput::new([Symptom::ChestTightness], 0, ""));
        assert_eq!(result.tier, RiskTier::High);
    }

    #[test]
    fn test_flare_two_severe_is_flare_up() {
        let answers = answers_with(&[
            (Question::Breath, SeverityLevel::Severe),
            (Question::Chest, SeverityLevel::Severe),
        ]);
        let result = FlareClassifier::default().classify(&answers);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.label, "Severe Asthma Flare-Up");
        assert_eq!(result.color, "#ffcccc");
        assert!(result.advice.contains("Use inhaler immediately"));
    }

    #[test]
    fn test_flare_single_severe_is_not_flare_up() {
        let answers = answers_with(&[(Question::Breath, SeverityLevel::Severe)]);
        assert_eq!(FlareClassifier::default().classify(&answers).label, "Mild / No Symptoms");
        // The questionnaire verdict disagrees on the same answers.
        assert_eq!(QuestionnaireClassifier::default().classify(&answers).tier, RiskTier::High);
    }

    #[test]
    fn test_flare_mild_counts() {
        let one = answers_with(&[(Question::Cough, SeverityLevel::Mild)]);
        let result = FlareClassifier::default().classify(&one);
        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.color, "#d4edda");

        let two = answers_with(&[
            (Question::Cough, SeverityLevel::Mild),
            (Question::Wheeze, SeverityLevel::Mild),
        ]);
        let result = FlareClassifier::default().classify(&two);
        assert_eq!(result.tier, RiskTier::Moderate);
        assert_eq!(result.label, "Moderate Symptoms");
    }

    #[test]
    fn test_flare_rules_deserialize_with_defaults() {
        let rules: FlareRules = serde_json::from_str(r#"{"severe_at_least": 1}"#).expect("Should parse");
        assert_eq!(rules.mild_at_least, 2);

        let answers = answers_with(&[(Question::Inhaler, SeverityLevel::Severe)]);
        assert_eq!(FlareClassifier::new(rules).classify(&answers).tier, RiskTier::High);
    }
}
