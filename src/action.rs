/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    NextTab,
    PrevTab,
    GoToTab(usize),

    // Dashboard operations
    Select,
    ToggleMeasure,
    RequestAdvice,
    RequestRecommendations,
    RaiseGoal,
    LowerGoal,
    RequestSavingsInsight,

    // Usage input
    Input(char),
    Backspace,

    // Modals
    ShowHelp,
    CloseModal,

    // App control
    Quit,
    Tick, // Drains finished advisor requests

    // No action
    None,
}
