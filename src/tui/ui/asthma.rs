//! Asthma check view: Symptom checklist, AQI input and trend chart.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::application::{ChartController, CityHistory, ExposureReport};
use crate::domain::{parse_aqi_field, ExposureInput, HistoryBuffer, Symptom};
use crate::tui::styles::{hex_color, AirTheme};

use super::{render_message, render_text_input, TextInput};

/// Focusable controls: the five checkboxes, then the two text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsthmaField {
    Symptom(usize),
    Aqi,
    Location,
}

impl Default for AsthmaField {
    fn default() -> Self {
        Self::Symptom(0)
    }
}

impl AsthmaField {
    const LAST_SYMPTOM: usize = Symptom::ALL.len() - 1;

    pub fn next(self) -> Self {
        match self {
            Self::Symptom(i) if i < Self::LAST_SYMPTOM => Self::Symptom(i + 1),
            Self::Symptom(_) => Self::Aqi,
            Self::Aqi => Self::Location,
            Self::Location => Self::Symptom(0),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Symptom(0) => Self::Location,
            Self::Symptom(i) => Self::Symptom(i - 1),
            Self::Aqi => Self::Symptom(Self::LAST_SYMPTOM),
            Self::Location => Self::Aqi,
        }
    }
}

#[derive(Debug, Default)]
pub struct AsthmaState {
    pub focus: AsthmaField,
    pub checked: [bool; Symptom::ALL.len()],
    pub aqi_input: TextInput,
    pub location_input: TextInput,
    pub report: Option<ExposureReport>,
    pub error: Option<String>,
}

impl AsthmaState {
    /// Toggle the focused checkbox, if a checkbox has focus.
    pub fn toggle(&mut self) {
        if let AsthmaField::Symptom(i) = self.focus {
            if let Some(slot) = self.checked.get_mut(i) {
                *slot = !*slot;
            }
        }
    }

    /// Route a typed character to the focused text field.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            AsthmaField::Aqi => self.aqi_input.input_char(c),
            AsthmaField::Location => self.location_input.input_char(c),
            AsthmaField::Symptom(_) if c == ' ' => self.toggle(),
            AsthmaField::Symptom(_) => {}
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            AsthmaField::Aqi => self.aqi_input.delete_char(),
            AsthmaField::Location => self.location_input.delete_char(),
            AsthmaField::Symptom(_) => {}
        }
    }

    /// Build the classifier input from the form.
    #[must_use]
    pub fn to_input(&self) -> ExposureInput {
        let symptoms = Symptom::ALL
            .iter()
            .zip(self.checked)
            .filter(|(_, checked)| *checked)
            .map(|(symptom, _)| *symptom);
        ExposureInput::new(
            symptoms,
            parse_aqi_field(&self.aqi_input.value),
            self.location_input.value.clone(),
        )
    }
}

pub fn render_asthma(f: &mut Frame, area: Rect, state: &AsthmaState, charts: &ChartController) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_form(f, columns[0], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Result
            Constraint::Length(6), // Emergency / city history
            Constraint::Min(0),    // Trend chart
        ])
        .split(columns[1]);

    render_result(f, right[0], state);
    render_side_panels(f, right[1], state);
    render_history_chart(f, right[2], charts);
}

fn render_form(f: &mut Frame, area: Rect, state: &AsthmaState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Symptom::ALL.len() as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let rows: Vec<Line> = Symptom::ALL
        .iter()
        .enumerate()
        .map(|(i, symptom)| {
            let mark = if state.checked[i] { "[x]" } else { "[ ]" };
            let style = if state.focus == AsthmaField::Symptom(i) {
                AirTheme::focused()
            } else {
                AirTheme::text()
            };
            Line::from(Span::styled(format!(" {mark} {}", symptom.description()), style))
        })
        .collect();

    let checklist = Paragraph::new(rows).block(
        Block::default()
            .title(Span::styled(" Symptoms ", AirTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(AirTheme::border()),
    );
    f.render_widget(checklist, chunks[0]);

    render_text_input(
        f,
        chunks[1],
        "Current AQI",
        "e.g. 150",
        &state.aqi_input,
        state.focus == AsthmaField::Aqi,
    );
    render_text_input(
        f,
        chunks[2],
        "Location",
        "optional",
        &state.location_input,
        state.focus == AsthmaField::Location,
    );

    let hints = Paragraph::new(vec![Line::from(vec![
        Span::styled("[↑↓] ", AirTheme::key_hint()),
        Span::styled("Move ", AirTheme::key_desc()),
        Span::styled("[Space] ", AirTheme::key_hint()),
        Span::styled("Toggle ", AirTheme::key_desc()),
        Span::styled("[Enter] ", AirTheme::key_hint()),
        Span::styled("Check risk", AirTheme::key_desc()),
    ])]);
    f.render_widget(hints, chunks[3]);
}

fn render_result(f: &mut Frame, area: Rect, state: &AsthmaState) {
    if let Some(err) = &state.error {
        render_message(f, area, err, AirTheme::danger());
        return;
    }

    let Some(report) = &state.report else {
        render_message(
            f,
            area,
            "Tick your symptoms, enter the AQI and press Enter.",
            AirTheme::text_muted(),
        );
        return;
    };

    let assessment = &report.assessment;
    let color = hex_color(assessment.color).unwrap_or(AirTheme::TEXT_PRIMARY);

    let block = Block::default()
        .title(Span::styled(" Risk ", AirTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(assessment.label, AirTheme::hex_fg(assessment.color)))),
        chunks[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(AirTheme::BG_DARK))
        .percent(assessment.width_percent)
        .label(format!("{}", assessment.tier));
    f.render_widget(gauge, chunks[1]);

    let details = Paragraph::new(vec![
        Line::from(Span::styled(assessment.advice.clone(), AirTheme::text())),
        Line::from(vec![
            Span::styled("Location: ", AirTheme::text_secondary()),
            Span::styled(report.location.clone(), AirTheme::text()),
            Span::styled("  AQI: ", AirTheme::text_secondary()),
            Span::styled(report.aqi.to_string(), AirTheme::text()),
            Span::styled(format!("  at {}", report.logged_at), AirTheme::text_muted()),
        ]),
        Line::from(vec![
            Span::styled("Symptoms alone: ", AirTheme::text_secondary()),
            Span::styled(report.checklist.label, AirTheme::hex_fg(report.checklist.color)),
        ]),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(details, chunks[2]);
}

fn render_side_panels(f: &mut Frame, area: Rect, state: &AsthmaState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let emergency = state.report.as_ref().is_some_and(|r| r.assessment.emergency);
    let (border, text) = if emergency {
        (AirTheme::danger(), AirTheme::danger())
    } else {
        (AirTheme::border(), AirTheme::text_muted())
    };
    let signs = Paragraph::new(vec![
        Line::from(Span::styled("Lips or fingernails turning blue", text)),
        Line::from(Span::styled("Too breathless to speak", text)),
        Line::from(Span::styled("Rescue inhaler not helping", text)),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Emergency signs ", text))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(signs, columns[0]);

    let history_lines = match state.report.as_ref().map(|r| &r.history) {
        Some(CityHistory::Found { heading, days }) => {
            let mut lines = vec![Line::from(Span::styled(heading.clone(), AirTheme::title()))];
            lines.extend(days.iter().enumerate().map(|(i, value)| {
                Line::from(vec![
                    Span::styled(format!("Day {}: ", i + 1), AirTheme::text_secondary()),
                    Span::styled(value.to_string(), AirTheme::text()),
                ])
            }));
            lines
        }
        Some(CityHistory::Missing { query }) => vec![Line::from(Span::styled(
            CityHistory::missing_message(query),
            AirTheme::warning(),
        ))],
        Some(CityHistory::NotRequested) | None => Vec::new(),
    };
    let history = Paragraph::new(history_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Recent AQI ", AirTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(AirTheme::border()),
    );
    f.render_widget(history, columns[1]);
}

fn render_history_chart(f: &mut Frame, area: Rect, charts: &ChartController) {
    let Some(history) = charts.history() else {
        return;
    };

    let buffer = history.buffer();
    let data = buffer.chart_points();
    let y_max = buffer.max_value().unwrap_or(0.0).max(50.0) * 1.1;
    let (x_max, x_labels) = x_axis(buffer);
    let labels: Vec<Span> = x_labels.into_iter().map(Span::raw).collect();

    let datasets = vec![Dataset::default()
        .name("AQI")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(AirTheme::PRIMARY))
        .data(&data)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", history.title), AirTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(AirTheme::border()),
        )
        .x_axis(
            Axis::default()
                .style(AirTheme::text_muted())
                .bounds([0.0, x_max])
                .labels(labels),
        )
        .y_axis(
            Axis::default()
                .style(AirTheme::text_muted())
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{:.0}", y_max))]),
        );

    f.render_widget(chart, area);
}

/// X bounds and labels for the logged points.
///
/// Labels are spread evenly over the bounds, so the bounds end at the last
/// point. A single point gets a blank trailing label to stay at x = 0.
fn x_axis(buffer: &HistoryBuffer) -> (f64, Vec<String>) {
    let mut labels: Vec<String> = buffer.iter().map(|p| p.label.clone()).collect();
    if labels.len() < 2 {
        labels.resize(2, String::new());
    }
    let x_max = buffer.len().saturating_sub(1).max(1) as f64;
    (x_max, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_order_wraps() {
        let mut focus = AsthmaField::default();
        for _ in 0..Symptom::ALL.len() {
            focus = focus.next();
        }
        assert_eq!(focus, AsthmaField::Aqi);
        assert_eq!(focus.next().next(), AsthmaField::Symptom(0));
        assert_eq!(AsthmaField::Symptom(0).prev(), AsthmaField::Location);
    }

    #[test]
    fn test_form_to_input() {
        let mut state = AsthmaState::default();
        state.toggle();
        state.focus = AsthmaField::Symptom(1);
        state.input_char(' ');
        state.focus = AsthmaField::Aqi;
        for c in "150".chars() {
            state.input_char(c);
        }
        state.focus = AsthmaField::Location;
        for c in "Delhi".chars() {
            state.input_char(c);
        }

        let input = state.to_input();
        assert_eq!(input.symptoms(), &[Symptom::Cough, Symptom::Wheeze]);
        assert_eq!(input.aqi, 150);
        assert_eq!(input.location, "Delhi");
    }

    #[test]
    fn test_non_numeric_aqi_reads_as_zero() {
        let mut state = AsthmaState::default();
        state.aqi_input.value = "high".to_string();
        assert_eq!(state.to_input().aqi, 0);
    }

    #[test]
    fn test_x_axis_tracks_logged_points() {
        let mut buffer = HistoryBuffer::new();
        assert_eq!(x_axis(&buffer), (1.0, vec![String::new(), String::new()]));

        buffer.push("09:00", 120.0);
        assert_eq!(x_axis(&buffer), (1.0, vec!["09:00".to_string(), String::new()]));

        buffer.push("09:05", 130.0);
        buffer.push("09:10", 140.0);
        let (x_max, labels) = x_axis(&buffer);
        assert_eq!(x_max, 2.0);
        assert_eq!(labels, vec!["09:00", "09:05", "09:10"]);
        // Last label sits on the last point.
        assert_eq!(buffer.chart_points().last().map(|p| p.0), Some(x_max));
    }
}
