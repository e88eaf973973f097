use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
};

use jadewater::config::RegionsConfig;
use jadewater::household::RegionalBaselines;

use crate::ui::{border_style, format_number, title_style, Theme};

const BAR_COLORS: &[Color] = &[Theme::SAPPHIRE, Theme::PEACH, Theme::GREEN, Theme::MAUVE, Theme::TEAL];

/// Regional insights tab
pub struct RegionalView;

impl RegionalView {
    pub fn render(frame: &mut Frame, area: Rect, config: &RegionsConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(5)])
            .split(area);

        Self::render_chart(frame, chunks[0], &config.baselines);
        Self::render_projection(frame, chunks[1], config);
    }

    fn render_chart(frame: &mut Frame, area: Rect, baselines: &RegionalBaselines) {
        let block = Block::default()
            .title(" Average Daily Water Usage per Person (gallons) ")
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));

        let bars: Vec<Bar> = baselines
            .iter()
            .enumerate()
            .map(|(i, baseline)| {
                let color = BAR_COLORS[i % BAR_COLORS.len()];
                Bar::default()
                    .value(baseline.daily_usage.max(0.0).round() as u64)
                    .text_value(format!("{:.0}", baseline.daily_usage))
                    .label(Line::from(baseline.region.clone()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Theme::BG_DARK).bg(color).add_modifier(Modifier::BOLD))
            })
            .collect();

        let bar_width = if bars.is_empty() {
            1
        } else {
            let inner = area.width.saturating_sub(2) as usize;
            ((inner / bars.len()).saturating_sub(2)).clamp(3, 20) as u16
        };

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(2)
            .label_style(Style::default().fg(Theme::FG_DARK));
        frame.render_widget(chart, area);
    }

    fn render_projection(frame: &mut Frame, area: Rect, config: &RegionsConfig) {
        let block = Block::default()
            .title(" Statewide Projection ")
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));

        let lines = match config
            .baselines
            .statewide_projection(&config.state, &config.reference, config.population)
        {
            Ok(savings) => vec![
                Line::styled(
                    format!(
                        " If everyone in {} ({} people) used water like the {} baseline, {} would save",
                        config.state,
                        format_number(config.population),
                        config.reference,
                        config.state
                    ),
                    Style::default().fg(Theme::FG_DARK),
                ),
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", format_number(savings.max(0.0).round() as u64)),
                        Style::default().fg(Theme::WATER).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("gallons per day.", Style::default().fg(Theme::FG_DARK)),
                ]),
            ],
            Err(e) => vec![Line::styled(format!(" {}", e), Style::default().fg(Theme::RED))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
