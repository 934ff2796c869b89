//! OpenAI-compatible chat completions adapter.
//!
//! Endpoint: POST {base_url}/chat/completions
//! Auth: Bearer token
//!
//! HTTP status and transport flags are mapped to [`ModelError`] kinds
//! directly; the message classifier is only consulted for statuses that
//! carry no clear meaning on their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ModelConfig;
use crate::extract::ExtractError;

use super::{ChatModel, ChatRequest, ModelError, ModelOutput};

/// Chat completions client
pub struct OpenAiClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

/// Error body: {"error": {"message": "...", "type": "...", "code": "..."}}
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Create a client from validated model settings.
    ///
    /// A missing credential is reported here, before any request is made.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ExtractError> {
        let api_key = config.validate()?.to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ExtractError::Service(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: completions_url(&config.base_url),
            api_key,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Map a non-success status and its body to a failure kind
fn status_error(status: StatusCode, body: &str) -> ModelError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ModelError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ModelError::RateLimited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ModelError::Timeout(message),
        _ => ModelError::from_message(format!("{status}: {message}")),
    }
}

fn transport_error(err: reqwest::Error) -> ModelError {
    if err.is_timeout() {
        ModelError::Timeout(err.to_string())
    } else if err.is_connect() {
        ModelError::Connection(err.to_string())
    } else {
        ModelError::from_message(err.to_string())
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ModelOutput, ModelError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ModelError::Other(format!("Failed to parse completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        Ok(ModelOutput {
            content,
            tokens_used: parsed.usage.and_then(|u| u.total_tokens),
        })
    }
}
