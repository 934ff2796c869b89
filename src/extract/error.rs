//! Extraction errors surfaced to callers.
//!
//! Transient model failures never show up here: they are absorbed by the
//! heuristic fallback inside the extractor.

use thiserror::Error;

/// Fatal extraction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Missing or rejected model credential
    #[error("{0}")]
    Configuration(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("model response was not a JSON array (got {0})")]
    NotAnArray(String),

    /// Any other model service failure, with the original message
    #[error("model request failed: {0}")]
    Service(String),
}

/// Coarse error classes, stable across message wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    MalformedResponse,
    Service,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::EmptyResponse | Self::InvalidJson(_) | Self::NotAnArray(_) => {
                ErrorKind::MalformedResponse
            }
            Self::Service(_) => ErrorKind::Service,
        }
    }

    /// Status an HTTP front end should answer with: 502 for upstream
    /// credential and service failures, 500 for everything else.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Configuration | ErrorKind::Service => 502,
            ErrorKind::MalformedResponse => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_statuses() {
        let err = ExtractError::Configuration("missing key".to_string());
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.to_string(), "missing key");

        assert_eq!(ExtractError::EmptyResponse.kind(), ErrorKind::MalformedResponse);
        assert_eq!(ExtractError::NotAnArray("object".into()).http_status(), 500);
        assert_eq!(ExtractError::Service("boom".into()).http_status(), 502);
    }
}
