//! Candidate participant names.

use indexmap::IndexSet;

/// Insertion-ordered, deduplicated set of candidate names.
///
/// Order matters: it is spliced into the model prompt and into the
/// owner-detection alternation as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantNames {
    names: IndexSet<String>,
}

impl ParticipantNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names joined with `sep`, first-seen first
    pub fn join(&self, sep: &str) -> String {
        self.iter().collect::<Vec<_>>().join(sep)
    }
}

impl<S: Into<String>> FromIterator<S> for ParticipantNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names = Self::new();
        for name in iter {
            names.insert(name);
        }
        names
    }
}

impl<S: Into<String>> Extend<S> for ParticipantNames {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
