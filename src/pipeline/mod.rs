//! History pipeline
//!
//! Drives one file's history run:
//!
//! ```text
//! Idle -> LogFetching -> LogParsed -> AwaitingSelection(List)
//!      -> DiffFetching -> DiffDisplayed -> AwaitingSelection(NextChangeset) | Idle
//! ```
//!
//! The pipeline never runs a process itself. Each step that needs hg returns
//! a [`PendingCommand`]; the owner runs it (on the worker pool or inline) and
//! feeds the output back through [`HistoryPipeline::on_command_finished`].
//! Any failure drops the run back to `Idle` without touching the panel.

mod grep;
mod surface;

#[cfg(test)]
mod tests;

pub use grep::GrepFlow;
pub use surface::{InputPrompt, PresentationSurface, PromptEvent, PromptId};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::hg::constants::{DEFAULT_LOG_LIMIT, HG_COMMAND, PANEL_NAME};
use crate::hg::{CommandRequest, HgCommands, HgError, Parser, StderrPolicy};
use crate::model::{AdvancePolicy, ChangesetNavigator, PanelRegistry, Syntax, WriteMode};

/// Which command a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineJob {
    Log,
    Diff,
    Grep,
}

/// A command the owner should run next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub job: PipelineJob,
    pub request: CommandRequest,
}

/// What the pipeline is waiting for while in `AwaitingSelection`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// A pick from the changeset list
    List,
    /// Yes/no on the "next changeset" prompt
    NextChangeset,
}

/// State of a history run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    LogFetching,
    LogParsed,
    AwaitingSelection(SelectionKind),
    DiffFetching,
    DiffDisplayed,
}

/// Knobs shared by the history and grep flows
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub commands: HgCommands,
    /// `--limit` passed to `hg log`
    pub limit: usize,
    /// Ask to continue with the next changeset after each diff
    pub prompt_for_next: bool,
    pub advance_policy: AdvancePolicy,
    pub stderr_policy: StderrPolicy,
    pub timeout: Option<Duration>,
    pub write_mode: WriteMode,
    pub grep_ignore_case: bool,
    pub panel_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            commands: HgCommands::new(HG_COMMAND),
            limit: DEFAULT_LOG_LIMIT,
            prompt_for_next: false,
            advance_policy: AdvancePolicy::default(),
            stderr_policy: StderrPolicy::default(),
            timeout: None,
            write_mode: WriteMode::default(),
            grep_ignore_case: false,
            panel_name: PANEL_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Bind a command line to `working_dir` with the configured policies
    pub(crate) fn request(&self, command_line: String, working_dir: &Path) -> CommandRequest {
        CommandRequest::new(command_line, working_dir)
            .with_stderr_policy(self.stderr_policy)
            .with_timeout(self.timeout)
    }
}

/// Directory a file's commands run in
///
/// A bare file name has an empty parent; that means the current directory.
pub(crate) fn working_dir_of(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// State machine for one file's changeset history
#[derive(Debug)]
pub struct HistoryPipeline {
    config: PipelineConfig,
    panels: PanelRegistry,
    navigator: ChangesetNavigator,
    state: PipelineState,
    file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    /// The navigator holds this run's changesets
    listed: bool,
}

impl HistoryPipeline {
    pub fn new(config: PipelineConfig, panels: PanelRegistry) -> Self {
        let navigator = ChangesetNavigator::new(config.advance_policy);
        Self {
            config,
            panels,
            navigator,
            state: PipelineState::Idle,
            file: None,
            working_dir: None,
            listed: false,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn navigator(&self) -> &ChangesetNavigator {
        &self.navigator
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// File of the current run
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Abandon the current run
    pub fn reset(&mut self) {
        if self.state != PipelineState::Idle {
            tracing::debug!(state = ?self.state, "resetting history pipeline");
        }
        self.state = PipelineState::Idle;
    }

    /// Start a history run for `file`
    ///
    /// `None` means the buffer has no backing file.
    pub fn begin_history(&mut self, file: Option<&Path>) -> Result<PendingCommand, HgError> {
        self.reset();
        let Some(file) = file else {
            tracing::warn!("history requested for an unsaved file");
            return Err(HgError::UnsavedFile);
        };

        let working_dir = working_dir_of(file);
        let command_line = self.config.commands.log(file, self.config.limit)?;
        let request = self.config.request(command_line, &working_dir);

        tracing::info!(file = %file.display(), limit = self.config.limit, "fetching history");
        self.file = Some(file.to_path_buf());
        self.working_dir = Some(working_dir);
        self.listed = false;
        self.state = PipelineState::LogFetching;

        Ok(PendingCommand {
            job: PipelineJob::Log,
            request,
        })
    }

    /// Feed back the output of a command this pipeline asked for
    ///
    /// Completions that do not match the current state (a run was reset
    /// while its command was in flight) are ignored.
    pub fn on_command_finished(
        &mut self,
        job: PipelineJob,
        result: Result<String, HgError>,
        surface: &mut dyn PresentationSurface,
    ) -> Result<Option<PendingCommand>, HgError> {
        let outcome = match (self.state, job) {
            (PipelineState::LogFetching, PipelineJob::Log) => {
                self.on_log_output(result, surface).map(|()| None)
            }
            (PipelineState::DiffFetching, PipelineJob::Diff) => {
                self.on_diff_output(result, surface).map(|()| None)
            }
            (state, job) => {
                tracing::debug!(?state, ?job, "ignoring stale completion");
                return Ok(None);
            }
        };
        self.fail_on_err(outcome)
    }

    /// The user picked a changeset (`Some(index)`) or dismissed the list
    pub fn on_selection(
        &mut self,
        choice: Option<usize>,
    ) -> Result<Option<PendingCommand>, HgError> {
        if self.state != PipelineState::AwaitingSelection(SelectionKind::List) {
            tracing::debug!(state = ?self.state, "selection outside of list prompt");
            return Ok(None);
        }

        let Some(index) = choice else {
            tracing::debug!("changeset list dismissed");
            self.reset();
            return Ok(None);
        };

        if let Err(error) = self.navigator.select(index) {
            return self.fail_on_err(Err(error.into()));
        }
        let outcome = self.diff_command().map(Some);
        self.fail_on_err(outcome)
    }

    /// Offer the already fetched changesets again
    ///
    /// Only from `Idle` once a log has been parsed for the current file.
    /// Returns whether the list was shown.
    pub fn reopen_list(&mut self, surface: &mut dyn PresentationSurface) -> bool {
        if self.state != PipelineState::Idle || !self.listed {
            return false;
        }
        let items = self
            .navigator
            .records()
            .iter()
            .map(|r| r.summary())
            .collect();
        self.state = PipelineState::AwaitingSelection(SelectionKind::List);
        surface.show_selection_list(items);
        true
    }

    /// Answer to the "next changeset" prompt
    pub fn on_next_prompt(
        &mut self,
        event: PromptEvent,
    ) -> Result<Option<PendingCommand>, HgError> {
        if self.state != PipelineState::AwaitingSelection(SelectionKind::NextChangeset) {
            return Ok(None);
        }

        match event {
            PromptEvent::Changed(_) => Ok(None),
            PromptEvent::Cancelled => {
                self.reset();
                Ok(None)
            }
            PromptEvent::Submitted(_) => {
                let outcome = self.diff_command().map(Some);
                self.fail_on_err(outcome)
            }
        }
    }

    fn on_log_output(
        &mut self,
        result: Result<String, HgError>,
        surface: &mut dyn PresentationSurface,
    ) -> Result<(), HgError> {
        let output = result?;
        self.state = PipelineState::LogParsed;

        let records = Parser::parse_log(&output)?;
        tracing::info!(count = records.len(), "parsed changesets");
        let items = records.iter().map(|r| r.summary()).collect();
        self.navigator.load(records);
        self.listed = true;

        self.state = PipelineState::AwaitingSelection(SelectionKind::List);
        surface.show_selection_list(items);
        Ok(())
    }

    fn on_diff_output(
        &mut self,
        result: Result<String, HgError>,
        surface: &mut dyn PresentationSurface,
    ) -> Result<(), HgError> {
        let patch = result?;
        let record = self.navigator.current()?;
        let text = format!("{record}\n{patch}");

        let panel = self.panels.create_if_absent(&self.config.panel_name);
        {
            let mut panel = panel.lock();
            panel.set_syntax(Syntax::Diff);
            panel.write(&text, self.config.write_mode);
        }
        surface.show_panel(&self.config.panel_name);
        self.state = PipelineState::DiffDisplayed;

        let advance = self.navigator.advance()?;
        tracing::debug!(?advance, index = ?self.navigator.current_index(), "advanced cursor");

        if self.config.prompt_for_next && advance.has_next() {
            let next = self.navigator.current()?;
            surface.show_input_prompt(InputPrompt::next_changeset(&next.summary()));
            self.state = PipelineState::AwaitingSelection(SelectionKind::NextChangeset);
        } else {
            self.state = PipelineState::Idle;
        }
        Ok(())
    }

    /// Build the diff command for the changeset under the cursor
    fn diff_command(&mut self) -> Result<PendingCommand, HgError> {
        let record = self.navigator.current()?;
        let command_line = self.config.commands.diff(record)?;
        let working_dir = self
            .working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::info!(changeset = %record.revision_spec(), "fetching diff");
        let request = self.config.request(command_line, &working_dir);
        self.state = PipelineState::DiffFetching;

        Ok(PendingCommand {
            job: PipelineJob::Diff,
            request,
        })
    }

    fn fail_on_err<T>(&mut self, outcome: Result<T, HgError>) -> Result<T, HgError> {
        if let Err(error) = &outcome {
            tracing::warn!(%error, state = ?self.state, "history run aborted");
            self.state = PipelineState::Idle;
        }
        outcome
    }
}
