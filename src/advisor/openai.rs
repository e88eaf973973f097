use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::{Prompt, TextGenerator};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiAdvisor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiAdvisor {
    /// Build a client from configuration, reading the key from the environment
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        if !config.enabled {
            return Err(AdvisorError::Disabled);
        }
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AdvisorError::MissingApiKey(config.api_key_env.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn payload(&self, prompt: &Prompt) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = prompt.system.as_deref() {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt.user }));

        let mut payload = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": prompt.max_tokens,
        });
        if let Some(temperature) = prompt.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }
}

#[async_trait]
impl TextGenerator for OpenAiAdvisor {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisorError> {
        debug!(model = %self.model, "requesting advisory text");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status {
                status,
                body: truncate(&body, 320),
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .first()
            .map(|c| extract_text(&c.message.content))
            .filter(|text| !text.is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}

/// Content can be a plain string or an array of typed parts
fn extract_text(content: &Value) -> String {
    if let Some(text) = content.as_str() {
        return text.trim().to_string();
    }

    content
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
