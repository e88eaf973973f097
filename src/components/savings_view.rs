use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

use jadewater::advisor::Advisory;
use jadewater::config::SavingsConfig;
use jadewater::household::{
    compare_with_rate, goal_progress, goal_savings, measure_savings, ConservationMeasure,
    GoalSavings, SavingsResult,
};

use crate::ui::{border_style, gallons, savings_color, selected_style, title_style, Theme};

const MAX_INPUT_LEN: usize = 9;
const DAYS_PER_YEAR: f64 = 365.0;
pub const DEFAULT_GOAL: u32 = 10;
pub const MAX_GOAL: u32 = 50;

/// Savings calculator tab: usage input, baseline comparison, measure picker, reduction goal
#[derive(Debug, Clone)]
pub struct SavingsView {
    pub input: String,
    pub measure_cursor: usize,
    pub chosen: Vec<bool>,
    /// Daily reduction goal in whole gallons, 0..=MAX_GOAL
    pub goal: u32,
    pub insight: Option<Advisory>,
    pub pending: bool,
}

impl SavingsView {
    pub fn new(measure_count: usize) -> Self {
        Self {
            input: "100".to_string(),
            measure_cursor: 0,
            chosen: vec![false; measure_count],
            goal: DEFAULT_GOAL,
            insight: None,
            pending: false,
        }
    }

    pub fn raise_goal(&mut self) {
        self.goal = (self.goal + 1).min(MAX_GOAL);
    }

    pub fn lower_goal(&mut self) {
        self.goal = self.goal.saturating_sub(1);
    }

    pub fn goal_savings(&self, config: &SavingsConfig) -> Result<GoalSavings, String> {
        goal_savings(f64::from(self.goal), config.cost_per_gallon).map_err(|e| e.to_string())
    }

    pub fn finish_insight(&mut self, advisory: Advisory) {
        self.pending = false;
        self.insight = Some(advisory);
    }

    pub fn handle_char(&mut self, c: char) {
        if self.input.len() >= MAX_INPUT_LEN {
            return;
        }
        // Digits and a single decimal point
        if c.is_ascii_digit() || (c == '.' && !self.input.contains('.')) {
            self.input.push(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        self.input.pop();
    }

    pub fn usage(&self) -> Option<f64> {
        self.input.parse::<f64>().ok()
    }

    pub fn comparison(&self, config: &SavingsConfig) -> Result<SavingsResult, String> {
        let usage = self
            .usage()
            .ok_or_else(|| "Enter your daily usage in gallons".to_string())?;
        compare_with_rate(usage, config.baseline_gallons, config.cost_per_gallon)
            .map_err(|e| e.to_string())
    }

    pub fn next_measure(&mut self) {
        if !self.chosen.is_empty() {
            self.measure_cursor = (self.measure_cursor + 1) % self.chosen.len();
        }
    }

    pub fn prev_measure(&mut self) {
        if !self.chosen.is_empty() {
            self.measure_cursor = if self.measure_cursor == 0 {
                self.chosen.len() - 1
            } else {
                self.measure_cursor - 1
            };
        }
    }

    pub fn toggle_measure(&mut self) {
        if let Some(flag) = self.chosen.get_mut(self.measure_cursor) {
            *flag = !*flag;
        }
    }

    pub fn selected_measures<'a>(
        &'a self,
        measures: &'a [ConservationMeasure],
    ) -> impl Iterator<Item = &'a ConservationMeasure> + 'a {
        measures
            .iter()
            .zip(self.chosen.iter())
            .filter(|(_, chosen)| **chosen)
            .map(|(measure, _)| measure)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, config: &SavingsConfig) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(7),
            ])
            .split(columns[0]);

        self.render_input(frame, left[0]);
        self.render_comparison(frame, left[1], config);
        self.render_insight(frame, left[2]);
        self.render_measures(frame, columns[1], config);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let input_style = if self.usage().is_some() {
            Style::default().fg(Theme::GREEN)
        } else {
            Style::default().fg(Theme::YELLOW)
        };
        let input = Paragraph::new(format!(" {}█", self.input))
            .style(input_style)
            .block(
                Block::default()
                    .title(" Daily Usage (gallons) ")
                    .title_style(title_style(true))
                    .borders(Borders::ALL)
                    .border_style(border_style(true)),
            );
        frame.render_widget(input, area);
    }

    fn render_comparison(&self, frame: &mut Frame, area: Rect, config: &SavingsConfig) {
        let block = Block::default()
            .title(format!(" vs Baseline ({:.0} gal/day) ", config.baseline_gallons))
            .title_style(title_style(false))
            .borders(Borders::ALL)
            .border_style(border_style(false));

        let lines = match self.comparison(config) {
            Err(message) => vec![Line::styled(
                format!(" {}", message),
                Style::default().fg(Theme::FG_DARK),
            )],
            Ok(result) => {
                let color = savings_color(result.status());
                match result {
                    SavingsResult::Above {
                        savings_potential,
                        projected_cost_savings,
                    } => vec![
                        Line::styled(
                            format!(
                                " You could save {:.2} gallons per day \
                                 by reducing to the baseline.",
                                savings_potential
                            ),
                            Style::default().fg(color),
                        ),
                        Line::raw(""),
                        Line::from(vec![
                            Span::styled(
                                " Potential cost savings ",
                                Style::default().fg(Theme::FG_DARK),
                            ),
                            Span::styled(
                                format!("${:.2} per day", projected_cost_savings),
                                Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
                            ),
                        ]),
                        Line::from(vec![
                            Span::styled("                        ", Style::default()),
                            Span::styled(
                                format!("${:.2} per year", projected_cost_savings * DAYS_PER_YEAR),
                                Style::default().fg(Theme::FG_DARK),
                            ),
                        ]),
                    ],
                    SavingsResult::AtBaseline => vec![Line::styled(
                        " You're using exactly the baseline amount.",
                        Style::default().fg(color),
                    )],
                    SavingsResult::Below { surplus_savings } => vec![Line::styled(
                        format!(
                            " Great job! You're already saving {:.2} gallons per day \
                             compared to the baseline.",
                            surplus_savings
                        ),
                        Style::default().fg(color),
                    )],
                }
            }
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_measures(&self, frame: &mut Frame, area: Rect, config: &SavingsConfig) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let items: Vec<ListItem> = config
            .measures
            .iter()
            .enumerate()
            .map(|(i, measure)| {
                let checked = self.chosen.get(i).copied().unwrap_or(false);
                let mark = if checked { "[x]" } else { "[ ]" };
                let line = Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(Theme::MAUVE)),
                    Span::styled(measure.name.clone(), Style::default().fg(Theme::FG)),
                    Span::styled(
                        format!("  {}/day", gallons(measure.gallons_per_day)),
                        Style::default().fg(Theme::OVERLAY),
                    ),
                ]);
                if i == self.measure_cursor {
                    ListItem::new(line).style(selected_style())
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(" Conservation Measures ")
                .title_style(title_style(false))
                .borders(Borders::ALL)
                .border_style(border_style(false)),
        );
        frame.render_widget(list, chunks[0]);

        let totals = measure_savings(
            self.selected_measures(&config.measures),
            config.cost_per_gallon,
        );
        let summary = vec![
            Line::from(vec![
                Span::styled(" Water saved ", Style::default().fg(Theme::FG_DARK)),
                Span::styled(
                    format!("{}/day", gallons(totals.gallons_per_day)),
                    Style::default().fg(Theme::WATER),
                ),
            ]),
            Line::from(vec![
                Span::styled(" Money saved ", Style::default().fg(Theme::FG_DARK)),
                Span::styled(
                    format!(
                        "${:.2}/day  ${:.2}/year",
                        totals.cost_per_day,
                        totals.cost_per_day * DAYS_PER_YEAR
                    ),
                    Style::default().fg(Theme::GREEN),
                ),
            ]),
        ];
        let summary_widget = Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(border_style(false)),
        );
        frame.render_widget(summary_widget, chunks[1]);

        self.render_goal(frame, chunks[2], chunks[3], config);
    }

    fn render_goal(
        &self,
        frame: &mut Frame,
        text_area: Rect,
        gauge_area: Rect,
        config: &SavingsConfig,
    ) {
        let projection = match self.goal_savings(config) {
            Ok(savings) => Span::styled(
                format!("${:.2}/day  ${:.2}/month", savings.daily, savings.monthly),
                Style::default().fg(Theme::GREEN),
            ),
            Err(message) => Span::styled(message, Style::default().fg(Theme::FG_DARK)),
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(" Reduce by   ", Style::default().fg(Theme::FG_DARK)),
                Span::styled(
                    format!("{} gal/day", self.goal),
                    Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (+/-)", Style::default().fg(Theme::OVERLAY)),
            ]),
            Line::from(vec![
                Span::styled(" Would save  ", Style::default().fg(Theme::FG_DARK)),
                projection,
            ]),
        ];
        let text = Paragraph::new(lines).block(
            Block::default()
                .title(" Goal ")
                .title_style(title_style(false))
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_style(border_style(false)),
        );
        frame.render_widget(text, text_area);

        let gauge_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(false));

        match self.usage().map(|usage| goal_progress(usage, f64::from(self.goal))) {
            Some(Ok(goal)) => {
                let gauge = Gauge::default()
                    .block(gauge_block)
                    .gauge_style(Style::default().fg(Theme::TEAL).bg(Theme::SURFACE0))
                    .ratio(goal.progress.clamp(0.0, 1.0))
                    .label(format!(
                        "{:.0}% of usage, {} left",
                        goal.progress * 100.0,
                        gallons(goal.remaining)
                    ));
                frame.render_widget(gauge, gauge_area);
            }
            _ => {
                let idle = Paragraph::new(" Enter a positive usage to track a goal")
                    .style(Style::default().fg(Theme::FG_DARK))
                    .block(gauge_block);
                frame.render_widget(idle, gauge_area);
            }
        }
    }

    fn render_insight(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Savings Insight (i) ")
            .title_style(title_style(self.pending))
            .borders(Borders::ALL)
            .border_style(border_style(self.pending));

        let line = match (&self.insight, self.pending) {
            (_, true) => Line::styled(" Asking the advisor...", Style::default().fg(Theme::YELLOW)),
            (Some(Advisory::Tip(text)), _) => {
                Line::styled(format!(" {}", text), Style::default().fg(Theme::FG))
            }
            (Some(Advisory::Unavailable(reason)), _) => Line::styled(
                format!(" Insight unavailable: {}", reason),
                Style::default().fg(Theme::RED),
            ),
            (None, _) => Line::styled(
                " Press i for a note on what your goal is worth",
                Style::default().fg(Theme::FG_DARK),
            ),
        };

        let paragraph = Paragraph::new(line).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
