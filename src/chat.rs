//! Relay for chat requests to an OpenAI-compatible provider.
//!
//! Configuration is via environment variables:
//! - `OPENAI_API_KEY` - provider credential. Absence does not prevent
//!   startup; the client is built with an empty credential and the provider
//!   rejects the first call instead.
//! - `OPENAI_BASE_URL` - Base URL (default: `https://api.openai.com/v1`)

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ChatMessage, ChatRequest};

/// Default provider base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when the request does not name one.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Temperature used when the request does not set one.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Relay errors, split by who is at fault.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The payload carried neither `messages` nor `prompt`.
    #[error("either messages or prompt is required")]
    BadRequest,

    /// Any provider-side failure: network, auth, quota, malformed response.
    /// Carries the provider's diagnostic text.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Minimal slice of the provider's completion response.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the external language-model provider.
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ChatClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set; /chat will fail at call time");
        }
        Self::new(base_url, api_key)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Normalize the payload shape and forward it to the provider.
    ///
    /// One blocking round trip, no retries, the client's default timeout.
    /// Returns the first choice's message content.
    pub async fn relay(&self, request: ChatRequest) -> Result<String, RelayError> {
        let messages = normalize_messages(&request)?;
        let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let temperature = request.temperature.unwrap_or(DEFAULT_TEMPERATURE);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": model,
                "messages": messages,
                "temperature": temperature,
            }))
            .send()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream(format!("{}: {}", status, body)));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| RelayError::Upstream(format!("malformed response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RelayError::Upstream("response contained no choices".to_string()))
    }
}

/// Derive the ordered message sequence from the payload: `messages` verbatim
/// when present, otherwise a single user message built from `prompt`.
fn normalize_messages(request: &ChatRequest) -> Result<Vec<ChatMessage>, RelayError> {
    if let Some(messages) = &request.messages {
        return Ok(messages.clone());
    }
    if let Some(prompt) = &request.prompt {
        return Ok(vec![ChatMessage::user(prompt.clone())]);
    }
    Err(RelayError::BadRequest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_used_verbatim() {
        let request = ChatRequest {
            messages: Some(vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "be brief".to_string(),
                },
                ChatMessage::user("hi"),
            ]),
            // A stray prompt alongside messages is ignored
            prompt: Some("ignored".to_string()),
            ..Default::default()
        };

        let messages = normalize_messages(&request).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "hi");
    }

    #[test]
    fn prompt_becomes_single_user_message() {
        let request = ChatRequest {
            prompt: Some("hello there".to_string()),
            ..Default::default()
        };

        let messages = normalize_messages(&request).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "hello there");
    }

    #[test]
    fn empty_payload_is_a_bad_request() {
        let request = ChatRequest::default();
        assert!(matches!(
            normalize_messages(&request),
            Err(RelayError::BadRequest)
        ));
    }
}
