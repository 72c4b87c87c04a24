//! Changeset (commit) data model

use std::fmt;

use crate::hg::{FIELD_SEPARATOR, RECORD_SEPARATOR};

/// Name hg gives the unnamed branch
pub const DEFAULT_BRANCH: &str = "default";

/// One changeset from `hg log`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangesetRecord {
    /// Local revision number (decimal, repository-local)
    pub revision: String,

    /// Short node hash
    pub node: String,

    /// Branch name (empty means the default branch)
    pub branch: String,

    /// Author, person part only
    pub author: String,

    /// Absolute date (isodate)
    pub date: String,

    /// Relative age, e.g. "3 days ago"
    pub age: String,

    /// First line of the commit message
    pub description: String,
}

impl ChangesetRecord {
    /// One-line summary shown in the selection list
    pub fn summary(&self) -> String {
        format!("{} {}: {}", self.author, self.age, self.description)
    }

    /// `rev:node` identifier accepted by `hg log -r`
    pub fn revision_spec(&self) -> String {
        format!("{}:{}", self.revision, self.node)
    }

    pub fn is_default_branch(&self) -> bool {
        self.branch.is_empty() || self.branch == DEFAULT_BRANCH
    }

    /// Render the record the way the log template emits it
    pub fn to_template_output(&self) -> String {
        let mut out = [
            self.revision.as_str(),
            &self.node,
            &self.branch,
            &self.author,
            &self.date,
            &self.age,
            &self.description,
        ]
        .join(FIELD_SEPARATOR);
        out.push_str(RECORD_SEPARATOR);
        out
    }
}

/// Header written above a changeset's diff in the output panel
impl fmt::Display for ChangesetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{} {}]\n - {}",
            self.revision, self.node, self.author, self.date, self.description
        )
    }
}
