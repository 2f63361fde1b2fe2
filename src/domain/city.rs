//! Compiled-in reference tables for the supported cities.
//!
//! All figures are illustrative and fixed; lookups normalize the name
//! (trim + lowercase) before matching.

use serde::Serialize;

/// Cities that appear in at least one reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Delhi,
    Lucknow,
    Shillong,
    Mumbai,
}

impl City {
    pub const ALL: [City; 4] = [Self::Delhi, Self::Lucknow, Self::Shillong, Self::Mumbai];

    /// Resolve a free-text name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "delhi" => Some(Self::Delhi),
            "lucknow" => Some(Self::Lucknow),
            "shillong" => Some(Self::Shillong),
            "mumbai" => Some(Self::Mumbai),
            _ => None,
        }
    }

    /// Lowercase key, as stored in `selectedCity`.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Delhi => "delhi",
            Self::Lucknow => "lucknow",
            Self::Shillong => "shillong",
            Self::Mumbai => "mumbai",
        }
    }

    /// Capitalized display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delhi => "Delhi",
            Self::Lucknow => "Lucknow",
            Self::Shillong => "Shillong",
            Self::Mumbai => "Mumbai",
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trim and lowercase a city query.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Station reading used by the home-page lookup and the tools page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationReading {
    pub lat: f64,
    pub lon: f64,
    /// 1-5 index, see [`crate::domain::categorize`]
    pub aqi_index: i64,
    pub pm25: u32,
    pub pm10: u32,
}

/// Pollutant profile shown after a city search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollutantProfile {
    pub aqi: u32,
    pub pm25: u32,
    pub pm10: u32,
    pub no2: u32,
    pub ozone: u32,
}

impl PollutantProfile {
    pub const LABELS: [&'static str; 4] = ["PM25", "PM10", "NO₂", "Ozone"];

    /// Values in [`Self::LABELS`] order.
    #[must_use]
    pub fn values(&self) -> [u32; 4] {
        [self.pm25, self.pm10, self.no2, self.ozone]
    }
}

/// Per-pollutant breakdown for the pollution bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollutionBreakdown {
    pub pm25: u32,
    pub pm10: u32,
    pub no2: u32,
    pub so2: u32,
}

impl PollutionBreakdown {
    pub const LABELS: [&'static str; 4] = ["PM2.5", "PM10", "NO₂", "SO₂"];
    pub const COLORS: [&'static str; 4] = ["#ff6384", "#36a2eb", "#ffce56", "#4bc0c0"];

    #[must_use]
    pub fn values(&self) -> [u32; 4] {
        [self.pm25, self.pm10, self.no2, self.so2]
    }
}

/// Number of days in the reference history.
pub const HISTORY_DAYS: usize = 3;

impl City {
    #[must_use]
    pub fn station(&self) -> Option<StationReading> {
        match self {
            Self::Delhi => Some(StationReading { lat: 28.6139, lon: 77.2090, aqi_index: 5, pm25: 180, pm10: 250 }),
            Self::Lucknow => Some(StationReading { lat: 26.8467, lon: 80.9462, aqi_index: 4, pm25: 150, pm10: 200 }),
            Self::Shillong => Some(StationReading { lat: 25.5788, lon: 91.8933, aqi_index: 2, pm25: 25, pm10: 40 }),
            Self::Mumbai => None,
        }
    }

    #[must_use]
    pub fn pollutants(&self) -> Option<PollutantProfile> {
        match self {
            Self::Delhi => Some(PollutantProfile { aqi: 310, pm25: 180, pm10: 240, no2: 95, ozone: 50 }),
            Self::Lucknow => Some(PollutantProfile { aqi: 220, pm25: 130, pm10: 180, no2: 60, ozone: 40 }),
            Self::Shillong => Some(PollutantProfile { aqi: 70, pm25: 30, pm10: 40, no2: 20, ozone: 15 }),
            Self::Mumbai => None,
        }
    }

    #[must_use]
    pub fn breakdown(&self) -> Option<PollutionBreakdown> {
        match self {
            Self::Delhi => Some(PollutionBreakdown { pm25: 120, pm10: 180, no2: 40, so2: 12 }),
            Self::Lucknow => Some(PollutionBreakdown { pm25: 95, pm10: 150, no2: 32, so2: 10 }),
            Self::Shillong => Some(PollutionBreakdown { pm25: 28, pm10: 45, no2: 12, so2: 5 }),
            Self::Mumbai => None,
        }
    }

    /// AQI for each of the previous three days, oldest first.
    #[must_use]
    pub fn recent_history(&self) -> [u32; HISTORY_DAYS] {
        match self {
            Self::Delhi => [310, 285, 340],
            Self::Lucknow => [210, 195, 230],
            Self::Shillong => [45, 52, 48],
            Self::Mumbai => [120, 115, 130],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(City::parse("  Delhi "), Some(City::Delhi));
        assert_eq!(City::parse("MUMBAI"), Some(City::Mumbai));
        assert_eq!(City::parse("paris"), None);
        assert_eq!(City::parse(""), None);
    }

    #[test]
    fn test_mumbai_has_history_only() {
        assert!(City::Mumbai.station().is_none());
        assert!(City::Mumbai.pollutants().is_none());
        assert!(City::Mumbai.breakdown().is_none());
        assert_eq!(City::Mumbai.recent_history(), [120, 115, 130]);
    }

    #[test]
    fn test_station_indices_are_categorized() {
        for city in [City::Delhi, City::Lucknow, City::Shillong] {
            let station = city.station().expect("Should have station");
            assert!((1..=5).contains(&station.aqi_index));
        }
    }

    #[test]
    fn test_key_round_trips() {
        for city in City::ALL {
            assert_eq!(City::parse(city.key()), Some(city));
        }
    }
}
