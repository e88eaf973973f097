pub mod layout;
pub mod styles;

pub use layout::*;
pub use styles::{
    border_style, fixture_color, format_number, gallons, key_desc_span, key_span,
    savings_color, selected_style, title_style, Theme,
};
