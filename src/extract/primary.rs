//! Model-backed action item extraction.
//!
//! One model call per transcript. Failure handling:
//! - credential rejected → [`ExtractError::Configuration`], never retried
//! - rate limit, quota, timeout, connection → heuristic fallback result
//! - empty, non-JSON or non-array output → malformed-response error
//! - anything else → [`ExtractError::Service`]

use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{ChatModel, ModelError, OpenAiClient};
use crate::config::ModelConfig;
use crate::domain::ActionItemDraft;

use super::error::ExtractError;
use super::{dates, fallback, normalize, participants, prompt};

fn re_opening_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^```(?:json)?\s*").unwrap())
}

fn re_closing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*```\s*$").unwrap())
}

enum Backend {
    Model {
        client: Arc<dyn ChatModel>,
        model: String,
        temperature: f32,
    },
    /// No model configured: every call uses the heuristic path
    FallbackOnly,
}

/// Transcript → action item drafts
pub struct Extractor {
    backend: Backend,
}

impl Extractor {
    /// Build an extractor backed by the OpenAI-compatible HTTP client.
    ///
    /// Fails immediately when the credential is missing.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ExtractError> {
        let client = OpenAiClient::from_config(config)?;
        Ok(Self::with_model(Arc::new(client), config))
    }

    /// Build an extractor around any chat model
    pub fn with_model(client: Arc<dyn ChatModel>, config: &ModelConfig) -> Self {
        Self {
            backend: Backend::Model {
                client,
                model: config.model.clone(),
                temperature: config.temperature,
            },
        }
    }

    /// An extractor that never calls a model
    pub fn fallback_only() -> Self {
        Self {
            backend: Backend::FallbackOnly,
        }
    }

    /// Extract drafts using today's local date for relative due dates
    pub async fn extract(&self, text: &str) -> Result<Vec<ActionItemDraft>, ExtractError> {
        self.extract_on(text, dates::local_today()).await
    }

    /// Extract drafts, resolving relative due dates against `today`
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn extract_on(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<Vec<ActionItemDraft>, ExtractError> {
        let (client, model, temperature) = match &self.backend {
            Backend::Model {
                client,
                model,
                temperature,
            } => (client, model, *temperature),
            Backend::FallbackOnly => {
                let drafts = fallback::extract(text, today);
                info!(drafts = drafts.len(), "heuristic extraction finished");
                return Ok(drafts);
            }
        };

        let names = participants::detect(text);
        debug!(participants = names.len(), "participants detected");
        let request = prompt::build_request(&names, text, model, temperature);

        let output = match client.complete(&request).await {
            Ok(output) => output,
            Err(err) if err.is_transient() => {
                warn!(adapter = client.name(), error = %err, "model unavailable, using heuristic extraction");
                return Ok(fallback::extract(text, today));
            }
            Err(ModelError::Authentication(message)) => {
                return Err(ExtractError::Configuration(format!(
                    "Invalid or missing model API key ({message}). Check {}.",
                    crate::config::ENV_API_KEY
                )));
            }
            Err(err) => return Err(ExtractError::Service(err.to_string())),
        };

        if let Some(tokens) = output.tokens_used {
            debug!(tokens, "model call finished");
        }

        let drafts = parse_completion(output.content.as_deref(), today)?;
        info!(drafts = drafts.len(), "model extraction finished");
        Ok(drafts)
    }
}

/// Parse a completion into drafts.
///
/// Drafts whose task falls outside the accepted length bounds are dropped.
pub fn parse_completion(
    content: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<ActionItemDraft>, ExtractError> {
    let raw = content.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ExtractError::EmptyResponse);
    }

    let cleaned = strip_code_fence(raw);
    let parsed: Value =
        serde_json::from_str(cleaned).map_err(|e| ExtractError::InvalidJson(e.to_string()))?;

    let Value::Array(items) = parsed else {
        return Err(ExtractError::NotAnArray(json_type(&parsed).to_string()));
    };

    let total = items.len();
    let drafts: Vec<ActionItemDraft> = items
        .iter()
        .map(|item| normalize::normalize_item(item, today))
        .filter(ActionItemDraft::has_acceptable_task)
        .collect();

    if drafts.len() < total {
        debug!(discarded = total - drafts.len(), "dropped drafts with unusable tasks");
    }

    Ok(drafts)
}

/// Remove an optional surrounding ```json fence
fn strip_code_fence(raw: &str) -> &str {
    let start = re_opening_fence().find(raw).map_or(0, |m| m.end());
    let rest = &raw[start..];
    let end = re_closing_fence().find(rest).map_or(rest.len(), |m| m.start());
    rest[..end].trim()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
