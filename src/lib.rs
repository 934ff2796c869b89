//! actionizer - Meeting transcript action item extractor
//!
//! Turns free-form meeting notes into a list of action items: task,
//! owner, due date and topical tags.
//!
//! # Architecture
//!
//! Extraction runs in two tiers:
//! - A language model is asked for a JSON array of action items
//! - When the model is rate limited or unreachable, a deterministic
//!   rule cascade extracts items from the text instead
//!
//! Both tiers produce the same [`ActionItemDraft`] shape. Relative due
//! dates ("by next Friday") are resolved against a reference day.
//!
//! # Modules
//!
//! - `adapters`: Language model integrations (OpenAI-compatible)
//! - `extract`: Extraction engine (Extractor, fallback rules, dates)
//! - `domain`: Data structures (ActionItemDraft, ParticipantNames)
//! - `config`: Configuration discovery
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Extract with the model, falling back to heuristics if unavailable
//! cat standup.txt | actionizer extract
//!
//! # Heuristics only, human-readable
//! actionizer extract --input standup.txt --offline --format text
//!
//! # Resolve a due-date phrase
//! actionizer date "next Friday"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod extract;

// Re-export main types at crate root for convenience
pub use adapters::{ChatModel, ChatRequest, ModelError, ModelOutput, OpenAiClient};
pub use config::{ModelConfig, ResolvedConfig};
pub use domain::{ActionItemDraft, ParticipantNames};
pub use extract::{ErrorKind, ExtractError, Extractor, TranscriptLimits};
