//! Adapter interfaces for language model services.
//!
//! Adapters report failures as a typed [`ModelError`] so the extractor can
//! decide between failing and degrading to the heuristic path without
//! reading error strings.

pub mod openai;

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

// Re-export the OpenAI-compatible adapter
pub use openai::OpenAiClient;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Output from a completion call
#[derive(Debug, Clone, Default)]
pub struct ModelOutput {
    /// Text of the first completion, if the service returned one
    pub content: Option<String>,

    /// Tokens used (if available)
    pub tokens_used: Option<u64>,
}

impl ModelOutput {
    /// Create an output with just content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tokens_used: None,
        }
    }
}

/// Failure kinds at the model boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

impl ModelError {
    /// Whether substituting the heuristic extractor is appropriate
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Classify a human-readable failure message.
    ///
    /// Only for failures that carry no structured signal (status code, error
    /// flags). This matches vendor wording and is therefore fragile; keep it
    /// the single place that reads error text.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if re_auth_failure().is_match(&message) {
            Self::Authentication(message)
        } else if re_quota_failure().is_match(&message) {
            Self::RateLimited(message)
        } else if re_timeout_failure().is_match(&message) {
            Self::Timeout(message)
        } else if re_connection_failure().is_match(&message) {
            Self::Connection(message)
        } else {
            Self::Other(message)
        }
    }
}

fn re_auth_failure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)api.key|authentication|unauthori[sz]ed").unwrap())
}

fn re_quota_failure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rate.limit|quota|usage|insufficient|exceeded").unwrap())
}

fn re_timeout_failure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)timeout|timed out|etimedout").unwrap())
}

fn re_connection_failure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)econnrefused|connection refused").unwrap())
}

/// Trait for language model services
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Run one chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ModelOutput, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_classification() {
        assert!(matches!(
            ModelError::from_message("Incorrect API key provided: sk-****"),
            ModelError::Authentication(_)
        ));
        assert!(matches!(
            ModelError::from_message("Rate limit reached for gpt-4o-mini"),
            ModelError::RateLimited(_)
        ));
        assert!(matches!(
            ModelError::from_message("You exceeded your current quota"),
            ModelError::RateLimited(_)
        ));
        assert!(matches!(
            ModelError::from_message("connect ETIMEDOUT 1.2.3.4:443"),
            ModelError::Timeout(_)
        ));
        assert!(matches!(
            ModelError::from_message("connect ECONNREFUSED 127.0.0.1:443"),
            ModelError::Connection(_)
        ));
        assert!(matches!(
            ModelError::from_message("The server had an error"),
            ModelError::Other(_)
        ));
    }

    #[test]
    fn test_transient_kinds() {
        assert!(ModelError::RateLimited(String::new()).is_transient());
        assert!(ModelError::Timeout(String::new()).is_transient());
        assert!(ModelError::Connection(String::new()).is_transient());
        assert!(!ModelError::Authentication(String::new()).is_transient());
        assert!(!ModelError::Other(String::new()).is_transient());
    }

    #[test]
    fn test_request_serializes_as_chat_payload() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("json only"), ChatMessage::user("hi")],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["model"], "gpt-4o-mini");
    }
}
