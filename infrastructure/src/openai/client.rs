//! Thin client for the OpenAI chat-completions API.
//!
//! Both backends (questioner and oracle) go through this one client; they
//! differ only in model, prompts and token budget.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use twentyq_domain::Model;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Errors from the OpenAI transport
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no message content")]
    EmptyResponse,
}

impl OpenAiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, OpenAiError::Http(e) if e.is_timeout())
    }
}

/// One chat message in API wire format
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the chat-completions endpoint
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Build a client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, OpenAiError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;
        Ok(Self::new(api_key, DEFAULT_BASE_URL))
    }

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Send one chat completion and return the message text.
    pub async fn chat(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        max_completion_tokens: u32,
        reasoning_effort: Option<&str>,
    ) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: model.as_str(),
            messages,
            max_completion_tokens,
            reasoning_effort,
        };

        debug!(model = %model, messages = messages.len(), "chat completion request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OpenAiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_omits_absent_effort() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = ChatRequest {
            model: "gpt-4o",
            messages: &messages,
            max_completion_tokens: 100,
            reasoning_effort: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_completion_tokens"], 100);
        assert!(json.get("reasoning_effort").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn test_request_serialization_includes_effort() {
        let messages = vec![ChatMessage::user("hi")];
        let request = ChatRequest {
            model: "o4-mini",
            messages: &messages,
            max_completion_tokens: 100,
            reasoning_effort: Some("high"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["reasoning_effort"], "high");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"content":"<answer>yes</answer>"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("<answer>yes</answer>")
        );
    }
}
