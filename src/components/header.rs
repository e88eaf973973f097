use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use jadewater::household::Dataset;

use crate::ui::Theme;

/// Header component with title and dataset summary
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, dataset: &Dataset, loading: bool) {
        use crate::ui::layout::header_layout;

        let (title_area, stats_area) = header_layout(area);

        // Title
        let title = Paragraph::new(" JadeWater ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        let seed = dataset
            .seed()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut spans = vec![
            Span::styled("HOUSEHOLDS ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(dataset.len().to_string(), Style::default().fg(Theme::WATER)),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled("SEED ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(seed, Style::default().fg(Theme::FG)),
            Span::styled(" │ ", Style::default().fg(Theme::BORDER)),
            Span::styled(
                Local::now().format("%H:%M").to_string(),
                Style::default().fg(Theme::FG_DARK),
            ),
        ];

        if loading {
            spans.push(Span::styled(" │ ", Style::default().fg(Theme::BORDER)));
            spans.push(Span::styled("⟳ advisor", Style::default().fg(Theme::YELLOW)));
        }
        spans.push(Span::raw(" "));

        let stats_line = Line::from(spans);
        let stats_widget = Paragraph::new(stats_line).alignment(Alignment::Right);
        frame.render_widget(stats_widget, stats_area);
    }
}
