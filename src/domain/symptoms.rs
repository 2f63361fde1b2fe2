//! Symptom inputs for the two asthma questionnaires.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// Severity answer for one questionnaire question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    None,
    Mild,
    Severe,
}

impl SeverityLevel {
    /// Cycle none → mild → severe → none (used by the form).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Mild,
            Self::Mild => Self::Severe,
            Self::Severe => Self::None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Severe => "severe",
        }
    }
}

impl std::str::FromStr for SeverityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "mild" => Ok(Self::Mild),
            "severe" => Ok(Self::Severe),
            other => Err(format!("Unknown severity: {other}")),
        }
    }
}

/// The six fixed questionnaire questions, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Question {
    Breath,
    Cough,
    Chest,
    Wheeze,
    Inhaler,
    Activity,
}

impl Question {
    pub const ALL: [Question; 6] = [
        Self::Breath,
        Self::Cough,
        Self::Chest,
        Self::Wheeze,
        Self::Inhaler,
        Self::Activity,
    ];

    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Breath => "Shortness of breath",
            Self::Cough => "Coughing",
            Self::Chest => "Chest tightness",
            Self::Wheeze => "Wheezing",
            Self::Inhaler => "Rescue inhaler use",
            Self::Activity => "Activity limitation",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One severity answer per [`Question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionnaireAnswers([SeverityLevel; 6]);

impl QuestionnaireAnswers {
    #[must_use]
    pub fn new(answers: [SeverityLevel; 6]) -> Self {
        Self(answers)
    }

    #[must_use]
    pub fn get(&self, question: Question) -> SeverityLevel {
        self.0[question.index()]
    }

    pub fn set(&mut self, question: Question, level: SeverityLevel) {
        self.0[question.index()] = level;
    }

    /// Number of answers at exactly `level`.
    #[must_use]
    pub fn count(&self, level: SeverityLevel) -> usize {
        self.0.iter().filter(|&&a| a == level).count()
    }

    #[must_use]
    pub fn any_severe(&self) -> bool {
        self.0.contains(&SeverityLevel::Severe)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Question, SeverityLevel)> + '_ {
        Question::ALL.iter().map(move |&q| (q, self.get(q)))
    }
}

/// Checklist symptom on the exposure form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symptom {
    Cough,
    Wheeze,
    Shortness,
    ChestTightness,
    NightWaking,
}

impl Symptom {
    pub const ALL: [Symptom; 5] = [
        Self::Cough,
        Self::Wheeze,
        Self::Shortness,
        Self::ChestTightness,
        Self::NightWaking,
    ];

    /// Stable label written to persisted state.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cough => "cough",
            Self::Wheeze => "wheeze",
            Self::Shortness => "shortness",
            Self::ChestTightness => "chest-tightness",
            Self::NightWaking => "night-waking",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cough => "Persistent cough",
            Self::Wheeze => "Wheezing",
            Self::Shortness => "Shortness of breath",
            Self::ChestTightness => "Chest tightness",
            Self::NightWaking => "Waking at night",
        }
    }
}

/// Parsed exposure form: checked symptoms, AQI value and location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposureInput {
    symptoms: Vec<Symptom>,
    pub aqi: i64,
    pub location: String,
}

impl ExposureInput {
    /// Build an input; duplicate symptoms are dropped, first occurrence kept.
    #[must_use]
    pub fn new(symptoms: impl IntoIterator<Item = Symptom>, aqi: i64, location: impl Into<String>) -> Self {
        let mut unique = Vec::new();
        for s in symptoms {
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        Self {
            symptoms: unique,
            aqi,
            location: location.into(),
        }
    }

    #[must_use]
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.symptoms.len()
    }

    /// Labels in check order, as persisted.
    #[must_use]
    pub fn symptom_labels(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.label().to_string()).collect()
    }
}

/// Parse a form AQI field. Anything non-numeric reads as 0.
///
/// Digit runs too long for `i64` saturate instead of reading as 0.
#[must_use]
pub fn parse_aqi_field(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);

    match trimmed[..digits_end].parse::<i64>() {
        Ok(value) => value,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}
