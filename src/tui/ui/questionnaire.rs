//! Questionnaire view: Six questions, each answered none / mild / severe.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Question, QuestionnaireAnswers, RiskAssessment, SeverityLevel};
use crate::tui::styles::{hex_color, AirTheme};

use super::render_message;

#[derive(Debug, Default)]
pub struct QuestionnaireState {
    pub answers: QuestionnaireAnswers,
    pub selected: usize,
    pub result: Option<RiskAssessment>,
    /// Flare-up verdict for the same answers
    pub flare: Option<RiskAssessment>,
}

impl QuestionnaireState {
    #[must_use]
    pub fn selected_question(&self) -> Question {
        Question::ALL[self.selected % Question::ALL.len()]
    }

    pub fn move_selection(&mut self, down: bool) {
        let len = Question::ALL.len();
        self.selected = if down {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    /// Advance the selected answer none → mild → severe → none.
    pub fn cycle_answer(&mut self) {
        let question = self.selected_question();
        let next = self.answers.get(question).next();
        self.answers.set(question, next);
    }

    pub fn set_answer(&mut self, level: SeverityLevel) {
        let question = self.selected_question();
        self.answers.set(question, level);
    }
}

pub fn render_questionnaire(f: &mut Frame, area: Rect, state: &QuestionnaireState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let rows: Vec<Line> = state
        .answers
        .iter()
        .enumerate()
        .map(|(i, (question, level))| {
            let focused = i == state.selected;
            let level_style = match level {
                SeverityLevel::None => AirTheme::text_muted(),
                SeverityLevel::Mild => AirTheme::warning(),
                SeverityLevel::Severe => AirTheme::danger(),
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:<22}", question.prompt()),
                    if focused { AirTheme::focused() } else { AirTheme::text() },
                ),
                Span::styled(format!("‹ {:^6} ›", level.as_str()), level_style),
            ])
        })
        .chain([
            Line::from(""),
            Line::from(vec![
                Span::styled(" [Space] ", AirTheme::key_hint()),
                Span::styled("Cycle ", AirTheme::key_desc()),
                Span::styled("[n/m/s] ", AirTheme::key_hint()),
                Span::styled("Set ", AirTheme::key_desc()),
                Span::styled("[Enter] ", AirTheme::key_hint()),
                Span::styled("Assess", AirTheme::key_desc()),
            ]),
        ])
        .collect();

    let form = Paragraph::new(rows).block(
        Block::default()
            .title(Span::styled(" Over the last week ", AirTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(AirTheme::border()),
    );
    f.render_widget(form, columns[0]);

    let (Some(assessment), Some(flare)) = (&state.result, &state.flare) else {
        render_message(f, columns[1], "Answer each question and press Enter.", AirTheme::text_muted());
        return;
    };

    let results = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(4)])
        .split(columns[1]);
    render_assessment(f, results[0], assessment);
    render_flare(f, results[1], flare);
}

fn render_flare(f: &mut Frame, area: Rect, flare: &RiskAssessment) {
    let lines = vec![
        Line::from(Span::styled(flare.label, AirTheme::hex_fg(flare.color))),
        Line::from(Span::styled(flare.advice.clone(), AirTheme::text())),
    ];
    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Flare-up ", AirTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(AirTheme::border()),
    );
    f.render_widget(panel, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let color = hex_color(assessment.color).unwrap_or(AirTheme::TEXT_PRIMARY);
    let block = Block::default()
        .title(Span::styled(" Result ", AirTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(assessment.label, AirTheme::hex_fg(assessment.color))),
        chunks[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(AirTheme::BG_DARK))
            .percent(assessment.width_percent)
            .label(Span::styled(assessment.tier.to_string(), AirTheme::risk_tier(assessment.tier))),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(assessment.advice.clone())
            .style(AirTheme::text())
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_and_set() {
        let mut state = QuestionnaireState::default();
        state.move_selection(false);
        assert_eq!(state.selected_question(), Question::Activity);

        state.cycle_answer();
        state.cycle_answer();
        assert_eq!(state.answers.get(Question::Activity), SeverityLevel::Severe);

        state.move_selection(true);
        state.set_answer(SeverityLevel::Mild);
        assert_eq!(state.answers.get(Question::Breath), SeverityLevel::Mild);
    }
}
