use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{centered_modal, Theme};

const BINDINGS: &[(&str, &str)] = &[
    ("Tab/S-Tab", "Next / previous tab"),
    ("1-4      ", "Jump to tab (not while typing usage)"),
    ("j/↓ k/↑  ", "Move selection"),
    ("Enter    ", "Get data / sample tips"),
    ("a        ", "AI tip from the fixture average"),
    ("A        ", "Three AI recommendations"),
    ("0-9 .    ", "Edit daily usage (Savings)"),
    ("Space    ", "Toggle conservation measure"),
    ("Backspace", "Delete last digit"),
    ("+/-      ", "Raise / lower the reduction goal"),
    ("i        ", "AI note on what the goal saves"),
    ("?        ", "This help"),
    ("q/Esc    ", "Quit"),
];

/// Help modal component
pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, area: Rect) {
        let modal_area = centered_modal(area, 60, BINDINGS.len() as u16 + 6);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let mut help_text = vec![
            Line::styled(
                "Keyboard Shortcuts",
                Style::default().bold().fg(Theme::SKY),
            ),
            Line::raw(""),
        ];
        help_text.extend(BINDINGS.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {}  ", key), Style::default().fg(Theme::YELLOW)),
                Span::raw(*desc),
            ])
        }));
        help_text.push(Line::raw(""));
        help_text.push(Line::styled("Press Esc to close", Style::default().fg(Theme::OVERLAY)));

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(help_text).block(block);

        frame.render_widget(paragraph, modal_area);
    }
}
