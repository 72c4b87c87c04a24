//! Changeset navigator
//!
//! Holds the changesets of one history run plus a cursor into them.

use thiserror::Error;

use super::ChangesetRecord;

/// Navigator misuse
///
/// These point at a pipeline bug, not at bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("Changeset index {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("No changeset selected yet")]
    Uninitialized,

    #[error("Advanced past the last changeset")]
    Exhausted,
}

/// What `advance()` does on the last changeset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvancePolicy {
    /// Stay on the last changeset
    #[default]
    Clamp,
    /// Go back to the first (newest) changeset
    Wrap,
    /// Move past the end; `current()` then fails with `Exhausted`
    Stop,
}

/// Result of a successful `advance()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved to the next changeset
    Moved,
    /// Already on the last changeset, cursor unchanged
    Clamped,
    /// Cursor went from the last changeset back to the first
    Wrapped,
    /// Cursor is past the end
    Exhausted,
}

impl Advance {
    /// Whether there is a fresh changeset under the cursor
    pub fn has_next(self) -> bool {
        matches!(self, Advance::Moved | Advance::Wrapped)
    }
}

/// Changesets of one file plus the current selection
#[derive(Debug, Default)]
pub struct ChangesetNavigator {
    records: Vec<ChangesetRecord>,
    current_index: Option<usize>,
    policy: AdvancePolicy,
}

impl ChangesetNavigator {
    pub fn new(policy: AdvancePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Replace the changesets and clear the selection
    pub fn load(&mut self, records: Vec<ChangesetRecord>) {
        self.records = records;
        self.current_index = None;
    }

    pub fn records(&self) -> &[ChangesetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Select the changeset at `index`
    pub fn select(&mut self, index: usize) -> Result<&ChangesetRecord, NavigatorError> {
        if index >= self.records.len() {
            return Err(NavigatorError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.current_index = Some(index);
        Ok(&self.records[index])
    }

    /// The selected changeset
    pub fn current(&self) -> Result<&ChangesetRecord, NavigatorError> {
        let index = self.current_index.ok_or(NavigatorError::Uninitialized)?;
        self.records.get(index).ok_or(NavigatorError::Exhausted)
    }

    /// Move the cursor to the next (older) changeset
    pub fn advance(&mut self) -> Result<Advance, NavigatorError> {
        let index = self.current_index.ok_or(NavigatorError::Uninitialized)?;
        let last = self.records.len().saturating_sub(1);

        if index < last {
            self.current_index = Some(index + 1);
            return Ok(Advance::Moved);
        }

        let outcome = match self.policy {
            AdvancePolicy::Clamp => Advance::Clamped,
            AdvancePolicy::Wrap => {
                self.current_index = Some(0);
                Advance::Wrapped
            }
            AdvancePolicy::Stop => {
                self.current_index = Some(self.records.len());
                Advance::Exhausted
            }
        };
        Ok(outcome)
    }
}
