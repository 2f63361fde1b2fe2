//! Home view: Station lookup and pollutant search.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{ChartController, CityProfile, Lookup, StationReport};
use crate::domain::City;
use crate::tui::styles::AirTheme;

use super::{render_bar_series, render_message, render_text_input, TextInput};

/// Focusable controls on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeField {
    #[default]
    Station,
    Search,
    Dropdown,
}

impl HomeField {
    pub fn next(self) -> Self {
        match self {
            Self::Station => Self::Search,
            Self::Search => Self::Dropdown,
            Self::Dropdown => Self::Station,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Station => Self::Dropdown,
            Self::Search => Self::Station,
            Self::Dropdown => Self::Search,
        }
    }
}

/// Cities offered by the search dropdown.
pub const DROPDOWN: [City; 3] = [City::Delhi, City::Lucknow, City::Shillong];

#[derive(Debug, Default)]
pub struct HomeState {
    pub focus: HomeField,
    pub station_input: TextInput,
    pub search_input: TextInput,
    /// Dropdown position; `None` is the empty "Select city" entry
    pub dropdown: Option<usize>,
    pub station: Option<Lookup<StationReport>>,
    pub search: Option<Lookup<CityProfile>>,
}

impl HomeState {
    pub fn cycle_dropdown(&mut self, forward: bool) {
        let len = DROPDOWN.len();
        self.dropdown = match (self.dropdown, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
    }

    #[must_use]
    pub fn selected_city(&self) -> Option<&'static str> {
        self.dropdown.and_then(|i| DROPDOWN.get(i)).map(City::key)
    }
}

pub fn render_home(f: &mut Frame, area: Rect, state: &HomeState, charts: &ChartController) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_station(f, columns[0], state);
    render_search(f, columns[1], state, charts);
}

fn render_station(f: &mut Frame, area: Rect, state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .margin(1)
        .split(area);

    render_text_input(
        f,
        chunks[0],
        "Station",
        "Delhi, Lucknow or Shillong",
        &state.station_input,
        state.focus == HomeField::Station,
    );

    match &state.station {
        None => render_message(f, chunks[1], "Press Enter to fetch air quality.", AirTheme::text_muted()),
        Some(Lookup::EmptyQuery) => render_message(f, chunks[1], "Please enter a city name.", AirTheme::warning()),
        Some(Lookup::NotFound(msg)) => render_message(f, chunks[1], msg, AirTheme::danger()),
        Some(Lookup::Found(report)) => {
            let lines = vec![
                Line::from(Span::styled(report.heading.clone(), AirTheme::title())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("AQI: ", AirTheme::text_secondary()),
                    Span::styled(
                        format!("{} ({})", report.aqi_index, report.info.category),
                        AirTheme::hex_fg(report.info.color),
                    ),
                ]),
                Line::from(Span::styled(report.info.advice, AirTheme::text())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("PM2.5: ", AirTheme::text_secondary()),
                    Span::styled(format!("{} µg/m³", report.pm25), AirTheme::text()),
                ]),
                Line::from(vec![
                    Span::styled("PM10:  ", AirTheme::text_secondary()),
                    Span::styled(format!("{} µg/m³", report.pm10), AirTheme::text()),
                ]),
                Line::from(vec![
                    Span::styled("Lat/Lon: ", AirTheme::text_secondary()),
                    Span::styled(format!("{:.4}, {:.4}", report.lat, report.lon), AirTheme::text_muted()),
                ]),
            ];

            let p = Paragraph::new(lines).block(
                Block::default()
                    .title(Span::styled(" Air Quality ", AirTheme::subtitle()))
                    .borders(Borders::ALL)
                    .border_style(AirTheme::border()),
            );
            f.render_widget(p, chunks[1]);
        }
    }
}

fn render_search(f: &mut Frame, area: Rect, state: &HomeState, charts: &ChartController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(3), // Dropdown
            Constraint::Length(3), // Result line
            Constraint::Min(0),    // Radar
        ])
        .margin(1)
        .split(area);

    render_text_input(
        f,
        chunks[0],
        "Search",
        "Type a city",
        &state.search_input,
        state.focus == HomeField::Search,
    );

    let focused = state.focus == HomeField::Dropdown;
    let choice = state
        .dropdown
        .and_then(|i| DROPDOWN.get(i))
        .map_or("Select city", City::name);
    let dropdown = Paragraph::new(Line::from(vec![
        Span::styled(" ◀ ", AirTheme::key_hint()),
        Span::styled(choice, if focused { AirTheme::focused() } else { AirTheme::text() }),
        Span::styled(" ▶", AirTheme::key_hint()),
    ]))
    .block(
        Block::default()
            .title(Span::styled(" City ", AirTheme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(if focused {
                AirTheme::border_focused()
            } else {
                AirTheme::border()
            }),
    );
    f.render_widget(dropdown, chunks[1]);

    match &state.search {
        Some(Lookup::Found(found)) => render_message(
            f,
            chunks[2],
            &format!("{}: AQI {}", found.city.name(), found.profile.aqi),
            AirTheme::success(),
        ),
        Some(Lookup::NotFound(msg)) => render_message(f, chunks[2], msg, AirTheme::danger()),
        _ => render_message(f, chunks[2], "Enter searches, ←/→ picks a city.", AirTheme::text_muted()),
    }

    if let Some(radar) = charts.radar() {
        render_bar_series(f, chunks[3], radar, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_cycles_through_empty_entry() {
        let mut state = HomeState::default();
        assert_eq!(state.selected_city(), None);

        state.cycle_dropdown(true);
        assert_eq!(state.selected_city(), Some("delhi"));
        state.cycle_dropdown(true);
        state.cycle_dropdown(true);
        assert_eq!(state.selected_city(), Some("shillong"));
        state.cycle_dropdown(true);
        assert_eq!(state.selected_city(), None);

        state.cycle_dropdown(false);
        assert_eq!(state.selected_city(), Some("shillong"));
    }
}
