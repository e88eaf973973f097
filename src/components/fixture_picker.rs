use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use jadewater::household::Fixture;

use crate::ui::{border_style, fixture_color, selected_style, title_style, Theme};

/// Selectable list over every fixture
#[derive(Debug, Clone)]
pub struct FixturePicker {
    pub selected_index: usize,
    pub state: ListState,
}

impl Default for FixturePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl FixturePicker {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            selected_index: 0,
            state,
        }
    }

    pub fn selected(&self) -> Fixture {
        Fixture::ALL[self.selected_index % Fixture::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % Fixture::ALL.len();
        self.state.select(Some(self.selected_index));
    }

    pub fn select_prev(&mut self) {
        self.selected_index = if self.selected_index == 0 {
            Fixture::ALL.len() - 1
        } else {
            self.selected_index - 1
        };
        self.state.select(Some(self.selected_index));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let items: Vec<ListItem> = Fixture::ALL
            .iter()
            .map(|fixture| {
                ListItem::new(Line::from(vec![
                    Span::styled(" ● ", Style::default().fg(fixture_color(*fixture))),
                    Span::styled(fixture.label(), Style::default().fg(Theme::FG)),
                ]))
            })
            .collect();

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(title_style(focused))
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_style())
            .highlight_symbol("▶");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
