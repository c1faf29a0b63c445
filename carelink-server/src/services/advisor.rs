use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::OpenAiConfiguration;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("advisor returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("advisor response had no choices")]
    EmptyResponse,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Thin client for the generative-text API used by the exercise
/// recommendation handler. One prompt in, one completion out; callers decide
/// how to degrade when a prompt fails.
pub struct Advisor {
    http: reqwest::Client,
    api_key: String,
    model: String,
    chat_url: String,
}

impl Advisor {
    pub fn new(config: &OpenAiConfiguration) -> Self {
        Self::with_chat_url(config, OPENAI_CHAT_URL)
    }

    pub fn with_chat_url(config: &OpenAiConfiguration, chat_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            chat_url: chat_url.to_string(),
        }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisorError::Status(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(AdvisorError::EmptyResponse)
    }
}
