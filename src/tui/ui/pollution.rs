//! Air-pollution view: Breakdown for the selected city and the AQI scale.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::ChartController;
use crate::domain::City;
use crate::tui::styles::AirTheme;

use super::{render_bar_series, render_message};

/// Cities with a breakdown, in picker order.
pub const PICKER: [City; 3] = [City::Delhi, City::Lucknow, City::Shillong];

#[derive(Debug, Default)]
pub struct PollutionState {
    pub cursor: usize,
    /// City currently charted
    pub shown: Option<City>,
    pub error: Option<String>,
}

impl PollutionState {
    pub fn move_cursor(&mut self, forward: bool) {
        let len = PICKER.len();
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    #[must_use]
    pub fn cursor_city(&self) -> City {
        PICKER[self.cursor % PICKER.len()]
    }

    /// Point the cursor at `city` if it is in the picker.
    pub fn sync_cursor(&mut self, city: City) {
        if let Some(i) = PICKER.iter().position(|&c| c == city) {
            self.cursor = i;
        }
    }
}

pub fn render_pollution(f: &mut Frame, area: Rect, state: &PollutionState, charts: &ChartController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_picker(f, chunks[0], state);

    let charts_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    if let Some(err) = &state.error {
        render_message(f, charts_row[0], err, AirTheme::danger());
    } else if let Some(pollution) = charts.pollution() {
        render_bar_series(f, charts_row[0], pollution, 7);
    }

    if let Some(scale) = charts.scale() {
        render_bar_series(f, charts_row[1], scale, 9);
    }
}

fn render_picker(f: &mut Frame, area: Rect, state: &PollutionState) {
    let mut spans = vec![Span::styled(" City: ", AirTheme::text_secondary())];
    for (i, city) in PICKER.iter().enumerate() {
        let style = if i == state.cursor {
            AirTheme::selected()
        } else if state.shown == Some(*city) {
            AirTheme::focused()
        } else {
            AirTheme::text()
        };
        spans.push(Span::styled(format!(" {} ", city.name()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  [←/→] ", AirTheme::key_hint()));
    spans.push(Span::styled("Choose ", AirTheme::key_desc()));
    spans.push(Span::styled("[Enter] ", AirTheme::key_hint()));
    spans.push(Span::styled("Show", AirTheme::key_desc()));

    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(AirTheme::border()),
    );
    f.render_widget(p, area);
}
