//! Chart ownership for the active page.
//!
//! One controller owns zero or one handle per chart kind. Handles are
//! created from the page identifier at startup; updates aimed at a chart
//! the page does not have are ignored.

use crate::domain::{
    AqiBand, City, HistoryBuffer, HistoryPoint, Page, PollutantProfile, PollutionBreakdown, AQI_SCALE,
};

/// Kinds of chart a page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Pollutant breakdown for the selected city
    Pollution,
    /// Pollutant profile after a city search
    Radar,
    /// Static AQI color scale
    AqiScale,
    /// Rolling AQI log
    History,
}

/// A labeled bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    /// Hex color, if the series colors bars individually
    pub color: Option<&'static str>,
}

/// Line chart fed by the history buffer.
#[derive(Debug, Clone, Default)]
pub struct HistoryChart {
    pub title: String,
    buffer: HistoryBuffer,
}

impl HistoryChart {
    #[must_use]
    pub fn points(&self) -> Vec<HistoryPoint> {
        self.buffer.snapshot()
    }

    #[must_use]
    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }
}

/// Owner of the charts on one page.
#[derive(Debug, Clone)]
pub struct ChartController {
    page: Page,
    pollution: Option<BarSeries>,
    radar: Option<BarSeries>,
    scale: Option<BarSeries>,
    history: Option<HistoryChart>,
    revision: u64,
}

impl ChartController {
    /// Create the charts that exist on `page`.
    #[must_use]
    pub fn for_page(page: Page) -> Self {
        let mut controller = Self {
            page,
            pollution: None,
            radar: None,
            scale: None,
            history: None,
            revision: 0,
        };

        match page {
            Page::Home => {
                controller.radar = Some(BarSeries {
                    title: "Pollutant Levels".to_string(),
                    bars: PollutantProfile::LABELS
                        .iter()
                        .map(|label| Bar {
                            label: (*label).to_string(),
                            value: 0,
                            color: None,
                        })
                        .collect(),
                });
            }
            Page::AirPollution => {
                controller.scale = Some(scale_series(&AQI_SCALE));
                controller.pollution = Some(BarSeries {
                    title: String::new(),
                    bars: Vec::new(),
                });
            }
            Page::Asthma => {
                controller.history = Some(HistoryChart {
                    title: "AQI Levels Logged".to_string(),
                    buffer: HistoryBuffer::new(),
                });
            }
            Page::Questionnaire | Page::Solutions | Page::Tools => {}
        }

        controller
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn has(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Pollution => self.pollution.is_some(),
            ChartKind::Radar => self.radar.is_some(),
            ChartKind::AqiScale => self.scale.is_some(),
            ChartKind::History => self.history.is_some(),
        }
    }

    /// Incremented after every chart mutation; the view redraws on change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a reading to the history chart.
    pub fn record_reading(&mut self, label: impl Into<String>, aqi: i64) {
        if let Some(history) = self.history.as_mut() {
            history.buffer.push(label, aqi as f64);
            self.revision += 1;
        }
    }

    /// Show a city's pollutant profile on the radar chart.
    pub fn show_pollutants(&mut self, city: City, profile: &PollutantProfile) {
        if let Some(radar) = self.radar.as_mut() {
            radar.title = format!("{} Pollutants", city.name());
            for (bar, value) in radar.bars.iter_mut().zip(profile.values()) {
                bar.value = u64::from(value);
            }
            self.revision += 1;
        }
    }

    /// Show a city's breakdown on the pollution chart.
    pub fn show_breakdown(&mut self, city: City, breakdown: &PollutionBreakdown) {
        if let Some(pollution) = self.pollution.as_mut() {
            pollution.title = format!("Pollution in {}", city.key().to_uppercase());
            pollution.bars = PollutionBreakdown::LABELS
                .iter()
                .zip(breakdown.values())
                .zip(PollutionBreakdown::COLORS)
                .map(|((label, value), color)| Bar {
                    label: (*label).to_string(),
                    value: u64::from(value),
                    color: Some(color),
                })
                .collect();
            self.revision += 1;
        }
    }

    #[must_use]
    pub fn pollution(&self) -> Option<&BarSeries> {
        self.pollution.as_ref()
    }

    #[must_use]
    pub fn radar(&self) -> Option<&BarSeries> {
        self.radar.as_ref()
    }

    #[must_use]
    pub fn scale(&self) -> Option<&BarSeries> {
        self.scale.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> Option<&HistoryChart> {
        self.history.as_ref()
    }
}

fn scale_series(bands: &[AqiBand]) -> BarSeries {
    BarSeries {
        title: "AQI Range Upper Limit".to_string(),
        bars: bands
            .iter()
            .map(|band| Bar {
                label: band.label.to_string(),
                value: band.upper_limit,
                color: Some(band.color),
            })
            .collect(),
    }
}
