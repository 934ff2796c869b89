//! Action item drafts produced by extraction.
//!
//! A draft is an unconfirmed action item: nothing has been persisted yet and
//! callers are free to display, edit or drop it.

use serde::{Deserialize, Serialize};

/// Tasks at or below this many characters are discarded
pub const MIN_TASK_CHARS: usize = 3;

/// Tasks at or above this many characters are discarded
pub const MAX_TASK_CHARS: usize = 500;

/// A single extracted action item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItemDraft {
    /// What needs to be done (whitespace-normalized)
    pub task: String,

    /// Who is responsible, if known
    pub owner: Option<String>,

    /// `YYYY-MM-DD`, or the original phrase when it could not be resolved
    #[serde(alias = "dueDate")]
    pub due_date: Option<String>,

    /// Topical keywords, in inference order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ActionItemDraft {
    /// Create a draft with only a task
    pub fn new(task: impl AsRef<str>) -> Self {
        Self {
            task: collapse_whitespace(task.as_ref()),
            owner: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    /// Set the owner; blank owners are stored as absent
    pub fn with_owner(mut self, owner: Option<impl Into<String>>) -> Self {
        self.owner = owner.map(Into::into).filter(|o| !o.trim().is_empty());
        self
    }

    pub fn with_due_date(mut self, due_date: Option<impl Into<String>>) -> Self {
        self.due_date = due_date.map(Into::into).filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags.into_iter().filter(|t| !t.is_empty()).collect();
        self
    }

    /// Whether the task length lies strictly inside the accepted bounds
    pub fn has_acceptable_task(&self) -> bool {
        is_acceptable_task(&self.task)
    }
}

/// Collapse internal whitespace runs to single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length check shared by both extraction paths (counted in characters)
pub fn is_acceptable_task(task: &str) -> bool {
    let len = task.chars().count();
    len > MIN_TASK_CHARS && len < MAX_TASK_CHARS
}
