//! Stack of open destination tags.

use smol_str::SmolStr;

/// Result of closing a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A matching entry was found. `orphans` entries above it were dropped
    /// without being closed.
    Closed { orphans: usize },
    /// No open entry carries this name; the stack is unchanged.
    Unmatched,
}

/// Destination tags opened but not yet closed, innermost last.
#[derive(Debug, Default)]
pub struct OpenTagStack {
    entries: Vec<SmolStr>,
}

impl OpenTagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: SmolStr) {
        self.entries.push(tag);
    }

    /// Find the innermost entry named `tag` and truncate the stack to just
    /// below it.
    pub fn close(&mut self, tag: &str) -> CloseOutcome {
        match self.entries.iter().rposition(|open| open == tag) {
            Some(index) => {
                let orphans = self.entries.len() - index - 1;
                self.entries.truncate(index);
                CloseOutcome::Closed { orphans }
            }
            None => CloseOutcome::Unmatched,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
