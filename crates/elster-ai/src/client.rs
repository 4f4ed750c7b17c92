//! OpenAI chat-completions client for batched refinement.
//!
//! Entries are reviewed in fixed-size batches. A failed batch is never
//! fatal: the caller gets the current labels back unchanged and a warning
//! is logged, so a flaky network cannot corrupt the table.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AiError, Result};
use crate::prompt::{BatchItem, SYSTEM_PROMPT, Suggestion, build_batch_prompt, parse_batch_response};

/// Chat completions endpoint.
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Model used when none is configured.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Entries per request.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Low temperature keeps corrections conservative.
const TEMPERATURE: f64 = 0.3;

/// Generous ceiling for a 50-entry numbered response.
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for AI-assisted friendly-name refinement.
pub struct RefinementClient {
    /// HTTP client.
    client: Client,
    /// Bearer token for the OpenAI API.
    api_key: String,
    /// Chat model identifier.
    model: String,
}

impl RefinementClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AiError::Network)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| AiError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Override the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Review one batch of entries, propagating transport and API errors.
    pub fn refine_batch(&self, items: &[BatchItem]) -> Result<Vec<Suggestion>> {
        debug!(batch_size = items.len(), model = %self.model, "Sending refinement batch");

        let user_prompt = build_batch_prompt(items);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(AiError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Api { status, message });
        }

        let body: ChatResponse = response.json().map_err(AiError::Network)?;
        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(AiError::EmptyResponse)?;

        Ok(parse_batch_response(content, items))
    }

    /// Review one batch, falling back to unchanged labels on any error.
    pub fn refine_batch_lenient(&self, items: &[BatchItem]) -> Vec<Suggestion> {
        match self.refine_batch(items) {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!(error = %err, "Batch refinement failed, keeping current labels");
                items
                    .iter()
                    .map(|item| Suggestion {
                        label: item.current_label.clone(),
                        changed: false,
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RefinementClient::new("sk-test");
        assert!(client.is_ok());
    }

    #[test]
    fn test_with_model() {
        let client = RefinementClient::new("sk-test").unwrap().with_model("gpt-4o");
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            messages: vec![ChatMessage {
                role: "system",
                content: "rules",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_chat_response_deserialization() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"1. OK"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "1. OK");
    }
}
