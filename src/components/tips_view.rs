use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use jadewater::advisor::Advisory;
use jadewater::household::Fixture;

use super::fixture_picker::FixturePicker;
use crate::ui::{border_style, fixture_color, split_pane, title_style, Theme};

/// Recommendations tab: sampled static tips plus an optional advisory
#[derive(Debug, Clone, Default)]
pub struct TipsView {
    pub picker: FixturePicker,
    pub tips: Vec<&'static str>,
    pub tips_fixture: Option<Fixture>,
    pub advisory: Option<(Fixture, Advisory)>,
    pub pending: bool,
    /// Why the advisor is switched off, when it is
    pub advisor_note: Option<String>,
}

impl TipsView {
    pub fn new(advisor_note: Option<String>) -> Self {
        Self {
            advisor_note,
            ..Self::default()
        }
    }

    pub fn show_tips(&mut self, fixture: Fixture, tips: Vec<&'static str>) {
        self.tips_fixture = Some(fixture);
        self.tips = tips;
    }

    pub fn finish(&mut self, fixture: Fixture, advisory: Advisory) {
        self.pending = false;
        self.advisory = Some((fixture, advisory));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (list_area, detail_area) = split_pane(area);
        self.picker.render(frame, list_area, "Area of Interest", true);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Min(0)])
            .split(detail_area);

        self.render_tips(frame, chunks[0]);
        self.render_advisory(frame, chunks[1]);
    }

    fn render_tips(&self, frame: &mut Frame, area: Rect) {
        let title = match self.tips_fixture {
            Some(fixture) => format!(" Conservation Tips: {} ", fixture),
            None => " Conservation Tips ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));

        let lines: Vec<Line> = if self.tips.is_empty() {
            vec![Line::styled(
                " Press Enter for tips on the selected fixture.",
                Style::default().fg(Theme::FG_DARK),
            )]
        } else {
            let accent = self.tips_fixture.map(fixture_color).unwrap_or(Theme::FG);
            self.tips
                .iter()
                .map(|tip| {
                    Line::from(vec![
                        Span::styled(" • ", Style::default().fg(accent)),
                        Span::styled(*tip, Style::default().fg(Theme::FG)),
                    ])
                })
                .collect()
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_advisory(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" AI Advisor ")
            .title_style(title_style(self.pending))
            .borders(Borders::ALL)
            .border_style(border_style(self.pending));

        let lines: Vec<Line> = if self.pending {
            vec![Line::styled(" ⟳ Requesting advice...", Style::default().fg(Theme::YELLOW))]
        } else {
            match (&self.advisory, &self.advisor_note) {
                (Some((fixture, Advisory::Tip(text))), _) => vec![
                    Line::styled(
                        format!(" {}", fixture),
                        Style::default().fg(fixture_color(*fixture)).add_modifier(Modifier::BOLD),
                    ),
                    Line::raw(""),
                    Line::styled(format!(" {}", text.trim()), Style::default().fg(Theme::FG)),
                ],
                (Some((_, Advisory::Unavailable(reason))), _) => vec![Line::styled(
                    format!(" Advice unavailable: {}", reason),
                    Style::default().fg(Theme::RED),
                )],
                (None, Some(note)) => vec![Line::styled(
                    format!(" Advisor off: {}", note),
                    Style::default().fg(Theme::OVERLAY),
                )],
                (None, None) => vec![Line::styled(
                    " Press a for a tip, A for three recommendations.",
                    Style::default().fg(Theme::FG_DARK),
                )],
            }
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
