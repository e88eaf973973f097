use ratatui::prelude::*;

use jadewater::household::{Fixture, SavingsStatus};

/// Catppuccin Mocha color theme
/// https://github.com/catppuccin/catppuccin
pub struct Theme;

impl Theme {
    // Base colors (Catppuccin Mocha - darkened)
    pub const CRUST: Color = Color::Rgb(17, 17, 27);          // #11111b
    pub const BG: Color = Self::CRUST;
    pub const BG_DARK: Color = Color::Rgb(12, 12, 20);        // modals, key bar
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);       // #313244
    pub const FG: Color = Color::Rgb(205, 214, 244);          // #cdd6f4
    pub const FG_DARK: Color = Color::Rgb(147, 153, 178);     // #9399b2
    pub const OVERLAY: Color = Color::Rgb(127, 132, 156);     // #7f849c

    // Accents
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);       // #cba6f7
    pub const RED: Color = Color::Rgb(243, 139, 168);         // #f38ba8
    pub const PEACH: Color = Color::Rgb(250, 179, 135);       // #fab387
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);      // #f9e2af
    pub const GREEN: Color = Color::Rgb(166, 227, 161);       // #a6e3a1
    pub const TEAL: Color = Color::Rgb(148, 226, 213);        // #94e2d5
    pub const SKY: Color = Color::Rgb(137, 220, 235);         // #89dceb
    pub const SAPPHIRE: Color = Color::Rgb(116, 199, 236);    // #74c7ec
    pub const BLUE: Color = Color::Rgb(137, 180, 250);        // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);    // #b4befe

    // UI elements
    pub const BORDER: Color = Self::SURFACE0;
    pub const BORDER_FOCUSED: Color = Self::MAUVE;
    pub const SELECTION_BG: Color = Self::SURFACE0;
    pub const SELECTION_FG: Color = Self::LAVENDER;

    // Water
    pub const WATER: Color = Self::SAPPHIRE;

    // Modal
    pub const MODAL_BG: Color = Self::BG_DARK;
    pub const MODAL_BORDER: Color = Self::MAUVE;
}

/// Color for a position relative to the baseline
pub fn savings_color(status: SavingsStatus) -> Color {
    match status {
        SavingsStatus::Above => Theme::RED,
        SavingsStatus::AtBaseline => Theme::YELLOW,
        SavingsStatus::Below => Theme::GREEN,
    }
}

/// Accent per fixture, shared by lists and metrics
pub fn fixture_color(fixture: Fixture) -> Color {
    match fixture {
        Fixture::Shower => Theme::SKY,
        Fixture::Laundry => Theme::LAVENDER,
        Fixture::Dishwashing => Theme::TEAL,
        Fixture::Garden => Theme::GREEN,
        Fixture::CarWash => Theme::PEACH,
    }
}

/// Create a style for selected items
pub fn selected_style() -> Style {
    Style::default()
        .bg(Theme::SELECTION_BG)
        .fg(Theme::SELECTION_FG)
        .add_modifier(Modifier::BOLD)
}

/// Create a style for borders
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::BORDER_FOCUSED)
    } else {
        Style::default().fg(Theme::BORDER)
    }
}

/// Create a style for panel titles
pub fn title_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::OVERLAY)
    }
}

/// Create a keybinding span (highlighted key)
pub fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .bg(Theme::MAUVE)
            .fg(Theme::BG_DARK)
            .add_modifier(Modifier::BOLD),
    )
}

/// Create a keybinding description span (with trailing separator)
pub fn key_desc_span(desc: &str) -> Span<'_> {
    Span::styled(format!(" {}   ", desc), Style::default().fg(Theme::FG_DARK))
}

/// Gallons with a unit suffix, two decimals
pub fn gallons(value: f64) -> String {
    format!("{:.2} gal", value)
}

/// Thousands separators for whole numbers
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().rev().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(2_530_446_272), "2,530,446,272");
    }
}
