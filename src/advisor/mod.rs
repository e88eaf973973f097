//! Advisory text from an external language-model service.
//!
//! The service is advisory only: its output is shown to the user and never
//! feeds a numeric computation.

pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use tracing::warn;

use crate::error::AdvisorError;

pub use openai::OpenAiAdvisor;
pub use prompt::{recommendations_prompt, savings_insight_prompt, tip_prompt, Prompt};

/// A fallible, possibly slow, text-completion service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError>;
}

/// What the dashboard shows for an advisory request
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    Tip(String),
    Unavailable(String),
}

impl Advisory {
    pub fn is_available(&self) -> bool {
        matches!(self, Advisory::Tip(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Advisory::Tip(text) | Advisory::Unavailable(text) => text,
        }
    }
}

/// Ask the generator, folding any failure into `Advisory::Unavailable`
pub async fn request_advisory(generator: &dyn TextGenerator, prompt: &Prompt) -> Advisory {
    match generator.generate(prompt).await {
        Ok(text) => Advisory::Tip(text),
        Err(e) => {
            warn!(error = %e, "advisory unavailable");
            Advisory::Unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::Fixture;
    use std::sync::Mutex;

    struct Scripted {
        reply: Option<String>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(prompt.user.clone());
            }
            self.reply.clone().ok_or(AdvisorError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_successful_generation_is_a_tip() {
        let generator = Scripted {
            reply: Some("Fix leaky faucets.".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let prompt = tip_prompt(Fixture::Shower, 25.0);
        let advisory = request_advisory(&generator, &prompt).await;

        assert_eq!(advisory, Advisory::Tip("Fix leaky faucets.".to_string()));
        assert!(advisory.is_available());
        assert_eq!(generator.seen.lock().unwrap().as_slice(), [prompt.user]);
    }

    #[tokio::test]
    async fn test_failure_becomes_unavailable() {
        let generator = Scripted {
            reply: None,
            seen: Mutex::new(Vec::new()),
        };
        let advisory = request_advisory(&generator, &Prompt::new("tip")).await;

        assert!(!advisory.is_available());
        assert_eq!(advisory.text(), "advisor returned no text");
    }
}
