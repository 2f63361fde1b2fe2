//! Asthma risk tiers and the assessment produced by the classifiers.

use serde::{Deserialize, Serialize};

/// Risk tier for asthma symptoms.
///
/// Ordered `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    /// Symptoms minimal, air acceptable
    Low,
    /// Monitoring recommended
    Moderate,
    /// Action required
    High,
}

impl RiskTier {
    /// Width of the risk bar, in percent.
    #[must_use]
    pub fn width_percent(&self) -> u16 {
        match self {
            Self::Low => 15,
            Self::Moderate => 50,
            Self::High => 100,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Output of a risk classifier, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,

    /// Headline shown in the tier color
    pub label: &'static str,

    /// Hex color, e.g. `#d32f2f`
    pub color: &'static str,

    /// Risk bar width (15, 50 or 100)
    pub width_percent: u16,

    /// Advisory text
    pub advice: String,

    /// Whether the emergency-signs panel should be highlighted
    pub emergency: bool,
}

impl RiskAssessment {
    #[must_use]
    pub fn new(tier: RiskTier, label: &'static str, color: &'static str, advice: impl Into<String>) -> Self {
        Self {
            tier,
            label,
            color,
            width_percent: tier.width_percent(),
            advice: advice.into(),
            emergency: tier == RiskTier::High,
        }
    }
}
