use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::Tab;
use crate::ui::{key_span, key_desc_span, Theme};

/// Keybinding definition
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

/// Status bar component (bottom of screen) - keybindings only
pub struct StatusBar;

impl StatusBar {
    pub fn feedback_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "fixture" },
            KeyBinding { key: "Enter", desc: "get data" },
            KeyBinding { key: "Tab", desc: "next tab" },
            KeyBinding { key: "?", desc: "help" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    pub fn recommendations_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "fixture" },
            KeyBinding { key: "Enter", desc: "tips" },
            KeyBinding { key: "a", desc: "ai tip" },
            KeyBinding { key: "A", desc: "ai x3" },
            KeyBinding { key: "Tab", desc: "next tab" },
            KeyBinding { key: "?", desc: "help" },
        ]
    }

    pub fn savings_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "0-9.", desc: "usage" },
            KeyBinding { key: "↑↓", desc: "measure" },
            KeyBinding { key: "Space", desc: "toggle" },
            KeyBinding { key: "+/-", desc: "goal" },
            KeyBinding { key: "i", desc: "insight" },
            KeyBinding { key: "Tab", desc: "next tab" },
            KeyBinding { key: "Esc", desc: "quit" },
        ]
    }

    pub fn regional_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "1-4", desc: "tab" },
            KeyBinding { key: "Tab", desc: "next tab" },
            KeyBinding { key: "?", desc: "help" },
            KeyBinding { key: "q", desc: "quit" },
        ]
    }

    pub fn help_keybindings() -> Vec<KeyBinding> {
        vec![KeyBinding { key: "Esc", desc: "close" }]
    }

    pub fn render(frame: &mut Frame, area: Rect, tab: Tab, modal_open: bool) {
        let keybindings = if modal_open {
            Self::help_keybindings()
        } else {
            match tab {
                Tab::Feedback => Self::feedback_keybindings(),
                Tab::Recommendations => Self::recommendations_keybindings(),
                Tab::Savings => Self::savings_keybindings(),
                Tab::Regional => Self::regional_keybindings(),
            }
        };

        let mut spans: Vec<Span> = Vec::new();
        for kb in keybindings {
            spans.push(key_span(kb.key));
            spans.push(key_desc_span(kb.desc));
        }

        let keys_line = Line::from(spans);
        let keys_widget = Paragraph::new(keys_line)
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}
