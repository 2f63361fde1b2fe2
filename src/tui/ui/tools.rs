//! Tools view: Instant AQI lookup.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{InstantAqi, Lookup};
use crate::tui::styles::AirTheme;

use super::{render_message, render_text_input, TextInput};

#[derive(Debug, Default)]
pub struct ToolsState {
    pub input: TextInput,
    pub result: Option<Lookup<InstantAqi>>,
}

pub fn render_tools(f: &mut Frame, area: Rect, state: &ToolsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(6), Constraint::Min(0)])
        .margin(1)
        .split(area);

    render_text_input(f, chunks[0], "Instant AQI", "City name, then Enter", &state.input, true);

    match &state.result {
        None => {}
        Some(Lookup::Found(instant)) => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(instant.heading.clone(), AirTheme::title())),
                Line::from(vec![
                    Span::styled("AQI: ", AirTheme::text_secondary()),
                    Span::styled(instant.aqi_index.to_string(), AirTheme::text()),
                ]),
                Line::from(vec![
                    Span::styled("Category: ", AirTheme::text_secondary()),
                    Span::styled(instant.info.category.to_string(), AirTheme::hex_fg(instant.info.color)),
                ]),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(AirTheme::border()),
            );
            f.render_widget(p, chunks[1]);
        }
        Some(Lookup::NotFound(msg)) => render_message(f, chunks[1], msg, AirTheme::danger()),
        Some(Lookup::EmptyQuery) => render_message(f, chunks[1], "Please enter a city name.", AirTheme::warning()),
    }
}
