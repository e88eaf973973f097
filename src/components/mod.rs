pub mod feedback_view;
pub mod fixture_picker;
pub mod header;
pub mod help_modal;
pub mod regional_view;
pub mod savings_view;
pub mod sparkline;
pub mod status_bar;
pub mod tab_bar;
pub mod tips_view;

pub use feedback_view::FeedbackView;
pub use header::Header;
pub use help_modal::HelpModal;
pub use regional_view::RegionalView;
pub use savings_view::SavingsView;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use tips_view::TipsView;
