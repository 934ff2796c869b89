//! Input limits for transcripts handed to the extractor.

use thiserror::Error;

/// Default cap on transcript size (2 MiB)
pub const DEFAULT_MAX_TRANSCRIPT_BYTES: usize = 2 * 1024 * 1024;

/// Limits applied before extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLimits {
    pub max_transcript_bytes: usize,
}

impl Default for TranscriptLimits {
    fn default() -> Self {
        Self {
            max_transcript_bytes: DEFAULT_MAX_TRANSCRIPT_BYTES,
        }
    }
}

impl TranscriptLimits {
    /// Validate a transcript and return it trimmed
    pub fn validate<'t>(&self, text: &'t str) -> Result<&'t str, InputViolation> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InputViolation::Empty);
        }

        let size = text.len();
        if size > self.max_transcript_bytes {
            return Err(InputViolation::TooLarge {
                actual: size,
                limit: self.max_transcript_bytes,
            });
        }

        Ok(trimmed)
    }
}

/// Rejected transcript input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputViolation {
    #[error("Transcript is empty")]
    Empty,

    #[error("Transcript too large: {actual} bytes > {limit} bytes")]
    TooLarge { actual: usize, limit: usize },
}
