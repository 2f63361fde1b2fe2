//! Solutions view: Recommendation from the last reading.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::Recommendation;
use crate::tui::styles::AirTheme;

use super::render_message;

#[derive(Debug, Default)]
pub struct SolutionsState {
    pub recommendation: Option<Recommendation>,
    pub error: Option<String>,
}

pub fn render_solutions(f: &mut Frame, area: Rect, state: &SolutionsState) {
    if let Some(err) = &state.error {
        render_message(f, area, err, AirTheme::danger());
        return;
    }

    let Some(rec) = &state.recommendation else {
        render_message(f, area, "No recommendation loaded.", AirTheme::text_muted());
        return;
    };

    let mut lines: Vec<Line> = rec
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                AirTheme::hex_fg(rec.info.color)
            } else {
                AirTheme::text()
            };
            Line::from(vec![Span::styled("• ", AirTheme::key_hint()), Span::styled(line, style)])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[R] ", AirTheme::key_hint()),
        Span::styled("Refresh", AirTheme::key_desc()),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Recommendations ", AirTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(AirTheme::border()),
    );
    f.render_widget(p, area);
}
