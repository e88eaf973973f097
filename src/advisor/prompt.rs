use crate::household::Fixture;

const SYSTEM_ROLE: &str = "You are an assistant that provides water conservation tips.";
const MOTIVATION_ROLE: &str = "You are a motivational assistant focused on sustainability.";

/// Request sent to a text generator
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Prompt {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            max_tokens: 100,
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One tip grounded in the fixture's average from the dataset
pub fn tip_prompt(fixture: Fixture, avg_usage: f64) -> Prompt {
    Prompt::new(format!(
        "Provide a water-saving tip for {} based on an average daily water usage of {:.2} gallons.",
        fixture, avg_usage
    ))
}

/// Three actionable tips for a fixture
pub fn recommendations_prompt(fixture: Fixture) -> Prompt {
    Prompt::new(format!(
        "The user has selected the {fixture} as their area of interest. \
         Provide three actionable, practical, and effective tips for reducing water usage related to the {fixture}."
    ))
    .with_system(SYSTEM_ROLE)
    .with_max_tokens(200)
    .with_temperature(0.7)
}

/// Encouragement built from the savings a reduction goal would bring
pub fn savings_insight_prompt(daily_savings: f64, monthly_savings: f64) -> Prompt {
    Prompt::new(format!(
        "Given a daily savings of ${:.2} and a monthly savings of ${:.2}, \
         generate a motivational message to encourage the user to continue their water-saving efforts.",
        daily_savings, monthly_savings
    ))
    .with_system(MOTIVATION_ROLE)
    .with_max_tokens(150)
}
