use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use jadewater::household::{average_usage, Dataset, Fixture};

use super::fixture_picker::FixturePicker;
use super::sparkline::Distribution;
use crate::ui::{border_style, fixture_color, gallons, split_pane, title_style, Theme};

const HISTOGRAM_BUCKETS: usize = 32;

/// Mean daily usage for one fixture across the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct UsageMetric {
    pub fixture: Fixture,
    pub average: f64,
    pub distribution: Distribution,
}

/// Real-time feedback tab
#[derive(Debug, Clone, Default)]
pub struct FeedbackView {
    pub picker: FixturePicker,
    pub metric: Option<Result<UsageMetric, String>>,
}

impl FeedbackView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the metric for the selected fixture. Returns whether it succeeded.
    pub fn show_metric(&mut self, dataset: &Dataset) -> bool {
        let fixture = self.picker.selected();
        let metric = average_usage(dataset, fixture.label())
            .map(|average| UsageMetric {
                fixture,
                average,
                distribution: Distribution::from_values(dataset.column(fixture), HISTOGRAM_BUCKETS),
            })
            .map_err(|e| e.to_string());

        let ok = metric.is_ok();
        self.metric = Some(metric);
        ok
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let (list_area, detail_area) = split_pane(area);
        self.picker.render(frame, list_area, "Fixture", true);

        let block = Block::default()
            .title(" Average Daily Usage ")
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));

        let mut lines = match &self.metric {
            None => vec![
                Line::raw(""),
                Line::styled(
                    "  Select a fixture and press Enter to get data.",
                    Style::default().fg(Theme::FG_DARK),
                ),
            ],
            Some(Err(message)) => vec![
                Line::raw(""),
                Line::styled(format!("  {}", message), Style::default().fg(Theme::RED)),
            ],
            Some(Ok(metric)) => metric_lines(metric, dataset.len()),
        };

        lines.push(Line::raw(""));
        lines.extend(dataset_lines(dataset));

        frame.render_widget(Paragraph::new(lines).block(block), detail_area);
    }
}

fn metric_lines(metric: &UsageMetric, households: usize) -> Vec<Line<'static>> {
    let accent = fixture_color(metric.fixture);
    vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                metric.fixture.label(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                format!("{:.2}", metric.average),
                Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" gallons/day", Style::default().fg(Theme::FG_DARK)),
            Span::styled(
                format!("  across {} households", households),
                Style::default().fg(Theme::OVERLAY),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Distribution ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(format!("{:>7.1} ", metric.distribution.min), Style::default().fg(Theme::OVERLAY)),
            Span::styled(metric.distribution.to_sparkline(), Style::default().fg(accent)),
            Span::styled(format!(" {:.1}", metric.distribution.max), Style::default().fg(Theme::OVERLAY)),
        ]),
    ]
}

fn dataset_lines(dataset: &Dataset) -> Vec<Line<'static>> {
    if dataset.is_empty() {
        return vec![Line::styled("  No households", Style::default().fg(Theme::FG_DARK))];
    }

    let n = dataset.len() as f64;
    let mean_total = dataset.records().iter().map(|r| r.total_daily_usage()).sum::<f64>() / n;
    let mean_size = dataset.records().iter().map(|r| r.household_size as f64).sum::<f64>() / n;

    vec![
        Line::styled("  Dataset", Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)),
        Line::from(vec![
            Span::styled("  Mean household total  ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(gallons(mean_total), Style::default().fg(Theme::WATER)),
        ]),
        Line::from(vec![
            Span::styled("  Mean household size   ", Style::default().fg(Theme::FG_DARK)),
            Span::styled(format!("{:.1} people", mean_size), Style::default().fg(Theme::FG)),
        ]),
    ]
}
