//! Action item extraction engine.
//!
//! This module contains:
//! - Extractor: model-backed extraction with heuristic degradation
//! - fallback: rule cascades for tasks, owners, due dates and tags
//! - dates: due-date phrase normalization
//! - participants: candidate name detection
//! - normalize: coercion of model output into drafts

pub mod dates;
pub mod error;
pub mod fallback;
pub mod limits;
pub mod normalize;
pub mod participants;
pub mod primary;
pub mod prompt;
pub mod tags;

// Re-export commonly used types
pub use error::{ErrorKind, ExtractError};
pub use limits::{InputViolation, TranscriptLimits};
pub use primary::{parse_completion, Extractor};
