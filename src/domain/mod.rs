//! Domain types for actionizer.
//!
//! - ActionItemDraft: one extracted action item
//! - ParticipantNames: ordered candidate names detected in a transcript

pub mod draft;
pub mod participants;

// Re-export commonly used types
pub use draft::{collapse_whitespace, is_acceptable_task, ActionItemDraft};
pub use participants::ParticipantNames;
