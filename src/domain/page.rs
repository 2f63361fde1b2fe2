//! Explicit page identifiers.
//!
//! The active page decides which charts and forms exist; nothing checks
//! for widgets at runtime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// City lookup and pollutant radar
    #[default]
    Home,
    /// Pollution breakdown and AQI scale
    AirPollution,
    /// Symptom checklist with AQI and trend chart
    Asthma,
    /// Six-question severity check
    Questionnaire,
    /// Recommendations from the last reading
    Solutions,
    /// Instant AQI lookup
    Tools,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Self::Home,
        Self::AirPollution,
        Self::Asthma,
        Self::Questionnaire,
        Self::Solutions,
        Self::Tools,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::AirPollution => "Air Pollution",
            Self::Asthma => "Asthma Check",
            Self::Questionnaire => "Symptom Questionnaire",
            Self::Solutions => "Solutions",
            Self::Tools => "Tools",
        }
    }

    /// Next page in menu order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "air-pollution" | "air_pollution" | "pollution" => Ok(Self::AirPollution),
            "asthma" => Ok(Self::Asthma),
            "questionnaire" => Ok(Self::Questionnaire),
            "solutions" => Ok(Self::Solutions),
            "tools" => Ok(Self::Tools),
            other => Err(format!("Unknown page: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_parsing() {
        assert_eq!("Asthma".parse::<Page>(), Ok(Page::Asthma));
        assert_eq!("air-pollution".parse::<Page>(), Ok(Page::AirPollution));
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Page::Tools.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Tools);
        assert_eq!(Page::Home.next().prev(), Page::Home);
    }
}
