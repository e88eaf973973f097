use ratatui::{
    prelude::*,
    widgets::Tabs,
};

use crate::app::Tab;
use crate::ui::Theme;

/// One-line tab strip under the header
pub struct TabBar;

impl TabBar {
    pub fn render(frame: &mut Frame, area: Rect, active: Tab) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(active.index())
            .style(Style::default().fg(Theme::OVERLAY))
            .highlight_style(
                Style::default()
                    .fg(Theme::LAVENDER)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(Span::styled("│", Style::default().fg(Theme::BORDER)));
        frame.render_widget(tabs, area);
    }
}
