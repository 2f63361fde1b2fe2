//! UI module: One view per page plus shared widgets.

pub mod asthma;
pub mod home;
pub mod pollution;
pub mod questionnaire;
pub mod solutions;
pub mod tools;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::application::BarSeries;
use crate::domain::Page;
use crate::tui::styles::{hex_color, AirTheme, LOGO_SMALL};

/// Single-line text field.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Render a titled text field, showing `hint` while empty.
pub fn render_text_input(f: &mut Frame, area: Rect, label: &str, hint: &str, input: &TextInput, focused: bool) {
    let (border_style, title_style) = if focused {
        (AirTheme::border_focused(), AirTheme::focused())
    } else {
        (AirTheme::border(), AirTheme::text_secondary())
    };

    let value = if input.value.is_empty() {
        Span::styled(hint.to_string(), AirTheme::text_muted())
    } else {
        Span::styled(input.value.clone(), AirTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value,
        if focused {
            Span::styled("▌", AirTheme::focused())
        } else {
            Span::raw("")
        },
    ]))
    .block(
        Block::default()
            .title(Span::styled(format!(" {label} "), title_style))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(content, area);
}

/// Page tabs across the top.
pub fn render_nav(f: &mut Frame, area: Rect, active: Page) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!("F{} {}", i + 1, page.title())))
        .collect();
    let selected = Page::ALL.iter().position(|&p| p == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(AirTheme::text_secondary())
        .highlight_style(AirTheme::selected())
        .block(
            Block::default()
                .title(Span::styled(format!(" {LOGO_SMALL} "), AirTheme::header()))
                .borders(Borders::BOTTOM)
                .border_style(AirTheme::border()),
        );

    f.render_widget(tabs, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Figures are illustrative. This tool does not replace professional medical advice.",
            AirTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("[Tab] ", AirTheme::key_hint()),
            Span::styled("Next page ", AirTheme::key_desc()),
            Span::styled("[F1-F6] ", AirTheme::key_hint()),
            Span::styled("Jump ", AirTheme::key_desc()),
            Span::styled("[Ctrl+Q] ", AirTheme::key_hint()),
            Span::styled("Quit", AirTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(AirTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Render a bar series, coloring bars individually when the series has colors.
pub fn render_bar_series(f: &mut Frame, area: Rect, series: &BarSeries, bar_width: u16) {
    let bars: Vec<Bar> = series
        .bars
        .iter()
        .map(|bar| {
            let color = bar.color.and_then(hex_color).unwrap_or(AirTheme::PRIMARY);
            Bar::default()
                .label(Line::from(bar.label.clone()))
                .value(bar.value)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(AirTheme::BG_DARK).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", series.title), AirTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(AirTheme::border()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2);

    f.render_widget(chart, area);
}

/// Bordered paragraph for a one-line status or error message.
pub fn render_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
    let p = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(AirTheme::border()),
        );
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "Delhi\n".chars() {
            input.input_char(c);
        }
        assert_eq!(input.value, "Delhi");

        input.delete_char();
        assert_eq!(input.value, "Delh");

        input.clear();
        assert!(input.value.is_empty());
    }
}
