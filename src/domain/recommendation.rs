//! Recommendations composed from the last persisted reading.

use serde::Serialize;

use super::aqi::{categorize, AqiInfo};

/// What was persisted by the last assessment or station lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastReading {
    /// Last AQI index (1-5 scale)
    pub aqi_index: i64,
    /// Last checked symptom labels, in check order
    pub symptoms: Vec<String>,
}

impl Default for LastReading {
    fn default() -> Self {
        Self {
            aqi_index: 1,
            symptoms: Vec::new(),
        }
    }
}

/// Displayable recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub info: AqiInfo,
    pub symptoms: String,
    pub remark: &'static str,
}

impl Recommendation {
    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Your Last AQI: {}", self.info.category),
            format!("Symptoms: {}", self.symptoms),
            self.remark.to_string(),
            self.info.advice.to_string(),
        ]
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "- {line}")?;
        }
        Ok(())
    }
}

/// Compose a recommendation from persisted state. Pure.
#[must_use]
pub fn compose(last_index: i64, last_symptoms: &[String]) -> Recommendation {
    let symptoms = if last_symptoms.is_empty() {
        "None".to_string()
    } else {
        last_symptoms.join(", ")
    };

    let remark = if last_index >= 4 {
        "Avoid going outside."
    } else if last_index == 3 {
        "Limit outdoor activity."
    } else {
        "Air quality is good."
    };

    Recommendation {
        info: categorize(last_index),
        symptoms,
        remark,
    }
}
