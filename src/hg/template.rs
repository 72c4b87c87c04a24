//! hg template and command-line definitions
//!
//! The log template emits one record per changeset, fields joined by
//! [`FIELD_SEPARATOR`] and each record closed by [`RECORD_SEPARATOR`].
//! A commit description may legitimately contain a single `|`, so records
//! are delimited by the doubled separator instead of escaping fields.

use std::borrow::Cow;
use std::path::Path;

use super::HgError;
use super::constants::{commands, flags};
use crate::model::ChangesetRecord;

/// Separator between fields of one record
pub const FIELD_SEPARATOR: &str = "|";

/// Separator closing each record
pub const RECORD_SEPARATOR: &str = "||";

/// Number of fields in one log record
pub const FIELD_COUNT: usize = 7;

/// Templates for hg commands
pub struct Templates;

impl Templates {
    /// Template for `hg log` output
    ///
    /// Fields (separated by `|`):
    /// 1. rev (local revision number)
    /// 2. node (short hash)
    /// 3. branch
    /// 4. author (person part only)
    /// 5. date (isodate)
    /// 6. age (relative, e.g. "3 days ago")
    /// 7. description (first line, placeholder when empty)
    ///
    /// The description is last so that a stray `|` in it can be folded back
    /// into the final field by the parser. An empty field would put `||`
    /// inside a record, hence the placeholder.
    pub fn log() -> &'static str {
        concat!(
            "{rev}",
            "|",
            "{node|short}",
            "|",
            "{branch}",
            "|",
            "{author|person}",
            "|",
            "{date|isodate}",
            "|",
            "{date|age}",
            "|",
            "{if(desc, desc|firstline, \"(no description)\")}",
            "||"
        )
    }
}

/// Builders for the command strings handed to the executor
///
/// Command strings are later split with shell-word rules, so every
/// free-form argument (paths, patterns) is shell-quoted here.
#[derive(Debug, Clone)]
pub struct HgCommands {
    program: String,
}

impl HgCommands {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `hg log --limit N --template '<T>' <file>`
    pub fn log(&self, file: &Path, limit: usize) -> Result<String, HgError> {
        Ok(format!(
            "{} {} {} {} {} '{}' {}",
            quote(&self.program)?,
            commands::LOG,
            flags::LIMIT,
            limit,
            flags::TEMPLATE,
            Templates::log(),
            quote_path(file)?
        ))
    }

    /// `hg log -p -r <rev>:<node>`
    pub fn diff(&self, record: &ChangesetRecord) -> Result<String, HgError> {
        Ok(format!(
            "{} {} {} {} {}:{}",
            quote(&self.program)?,
            commands::LOG,
            flags::PATCH,
            flags::REVISION,
            record.revision,
            record.node
        ))
    }

    /// `hg grep -u -d -n [-i] <pattern> <file>`
    pub fn grep(&self, pattern: &str, file: &Path, ignore_case: bool) -> Result<String, HgError> {
        let mut line = format!(
            "{} {} {} {} {}",
            quote(&self.program)?,
            commands::GREP,
            flags::GREP_USER,
            flags::GREP_DATE,
            flags::GREP_LINE_NUMBER
        );
        if ignore_case {
            line.push(' ');
            line.push_str(flags::GREP_IGNORE_CASE);
        }
        line.push(' ');
        line.push_str(&quote(pattern)?);
        line.push(' ');
        line.push_str(&quote_path(file)?);
        Ok(line)
    }
}

fn quote(arg: &str) -> Result<Cow<'_, str>, HgError> {
    shlex::try_quote(arg).map_err(|e| HgError::InvalidCommand(format!("{arg:?}: {e}")))
}

fn quote_path(path: &Path) -> Result<String, HgError> {
    let text = path.to_string_lossy();
    quote(&text).map(Cow::into_owned)
}
