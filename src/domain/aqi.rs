//! AQI category lookup.
//!
//! Maps the 1-5 air-quality index used by the station table to a
//! qualitative category, a display color and health advice.

use serde::{Deserialize, Serialize};

/// Qualitative air-quality category derived from an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    /// Any index outside 1..=5
    Unknown,
}

impl AqiCategory {
    /// Category for an index. Total over all integers.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    /// Display color as a hex string.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#00e400",
            Self::Fair => "#ffff00",
            Self::Moderate => "#ff7e00",
            Self::Poor => "#ff0000",
            Self::VeryPoor => "#8f3f97",
            Self::Unknown => "#ccc",
        }
    }

    /// Health advice shown next to the category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is good.",
            Self::Fair => "Moderate risk for sensitive groups.",
            Self::Moderate => "Asthma patients should limit outdoor activity.",
            Self::Poor => "Avoid outdoor physical activity.",
            Self::VeryPoor => "Severe health risk! Stay indoors.",
            Self::Unknown => "No data available.",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Poor => write!(f, "Poor"),
            Self::VeryPoor => write!(f, "Very Poor"),
            Self::Unknown => write!(f, "--"),
        }
    }
}

/// Category, color and advice for a single index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiInfo {
    pub category: AqiCategory,
    pub color: &'static str,
    pub advice: &'static str,
}

/// Look up the category for an AQI index.
///
/// Never fails: 0, negatives and anything above 5 map to
/// [`AqiCategory::Unknown`].
#[must_use]
pub fn categorize(index: i64) -> AqiInfo {
    let category = AqiCategory::from_index(index);
    AqiInfo {
        category,
        color: category.color(),
        advice: category.advice(),
    }
}

/// One band of the US AQI color scale (used by the scale chart).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiBand {
    pub label: &'static str,
    pub upper_limit: u64,
    pub color: &'static str,
}

/// AQI scale bands, lowest first.
pub const AQI_SCALE: [AqiBand; 6] = [
    AqiBand { label: "Good (0-50)", upper_limit: 50, color: "#00e400" },
    AqiBand { label: "Moderate (51-100)", upper_limit: 100, color: "#ffff00" },
    AqiBand { label: "Poor (101-150)", upper_limit: 150, color: "#ff7e00" },
    AqiBand { label: "Unhealthy (151-200)", upper_limit: 200, color: "#ff0000" },
    AqiBand { label: "V. Unhealthy (201-300)", upper_limit: 300, color: "#8f3f97" },
    AqiBand { label: "Hazardous (301+)", upper_limit: 400, color: "#7e0023" },
];
