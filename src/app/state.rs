//! Application state and command dispatch

use std::path::{Path, PathBuf};

use super::surface::{Screen, View};
use crate::hg::{CommandWorker, Completion, HgError, Ticket};
use crate::model::{Notification, PanelRegistry};
use crate::pipeline::{
    GrepFlow, HistoryPipeline, PendingCommand, PipelineConfig, PipelineJob, PipelineState,
    PresentationSurface, SelectionKind,
};

/// The terminal host
///
/// Owns the pipelines and the worker pool. Commands the pipelines ask for are
/// queued on the worker; completions are drained on every tick and fed back.
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub screen: Screen,
    pub(crate) pipeline: HistoryPipeline,
    pub(crate) grep: GrepFlow,
    worker: CommandWorker<PipelineJob>,
    /// File whose history is browsed; `None` for an unsaved buffer
    file: Option<PathBuf>,
    /// Outstanding log or diff command
    history_ticket: Option<Ticket>,
    /// Outstanding grep command
    grep_ticket: Option<Ticket>,
}

impl App {
    pub fn new(
        config: PipelineConfig,
        worker: CommandWorker<PipelineJob>,
        file: Option<PathBuf>,
    ) -> Self {
        let panels = PanelRegistry::new();
        let mut screen = Screen::new(panels.clone());
        screen.changesets.file_label = file.as_ref().map(|f| f.display().to_string());

        Self {
            running: true,
            screen,
            pipeline: HistoryPipeline::new(config.clone(), panels.clone()),
            grep: GrepFlow::new(config, panels),
            worker,
            file,
            history_ticket: None,
            grep_ticket: None,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// A log, diff or grep is in flight
    pub fn is_busy(&self) -> bool {
        self.history_ticket.is_some() || self.grep_ticket.is_some()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// (Re)fetch the file's history; an outstanding run is abandoned
    pub fn begin_history(&mut self) {
        if let Some(ticket) = self.history_ticket.take() {
            self.worker.cancel(ticket);
        }
        let command = self.pipeline.begin_history(self.file.as_deref());
        self.dispatch_or_report(command.map(Some));
    }

    /// Grep the file's history for `pattern`
    pub fn begin_grep(&mut self, pattern: &str) {
        if let Some(ticket) = self.grep_ticket.take() {
            self.worker.cancel(ticket);
        }
        let command = self.grep.begin(pattern, self.file.as_deref());
        self.dispatch_or_report(command.map(Some));
    }

    /// Feed every finished command back into its flow
    pub fn drain_completions(&mut self) {
        while let Some(completion) = self.worker.poll() {
            self.on_completion(completion);
        }
    }

    pub fn clear_expired_notification(&mut self) {
        self.screen.clear_expired_notification();
    }

    /// Pick changeset `index` from the list
    ///
    /// After a diff or a dismissed list the run is idle again; the fetched
    /// changesets are offered once more before the pick is applied.
    pub(crate) fn select_changeset(&mut self, index: usize) {
        if self.pipeline.state() == PipelineState::Idle
            && !self.pipeline.reopen_list(&mut self.screen)
        {
            self.screen.notify(Notification::warning(
                "No changesets loaded, press r to reload",
            ));
            return;
        }
        if self.pipeline.state() != PipelineState::AwaitingSelection(SelectionKind::List) {
            self.screen
                .notify(Notification::warning("hg is still running, try again"));
            return;
        }
        let command = self.pipeline.on_selection(Some(index));
        self.dispatch_or_report(command);
    }

    /// Dismiss the list without picking anything
    pub(crate) fn dismiss_list(&mut self) {
        let command = self.pipeline.on_selection(None);
        self.dispatch_or_report(command);
        self.screen.changesets.deactivate();
    }

    /// Bring the list back to front, offering the fetched changesets again
    pub(crate) fn show_list(&mut self) {
        self.screen.view = View::ChangesetList;
        self.pipeline.reopen_list(&mut self.screen);
    }

    /// Bring the output panel to front if anything was written to it
    pub(crate) fn show_output_panel(&mut self) {
        let name = self.pipeline.config().panel_name.clone();
        self.screen.show_panel(&name);
        if self.screen.view != View::Panel {
            self.screen
                .notify(Notification::warning("Nothing in the panel yet"));
        }
    }

    pub(crate) fn dispatch_or_report(&mut self, command: Result<Option<PendingCommand>, HgError>) {
        match command {
            Ok(Some(command)) => self.dispatch(command),
            Ok(None) => {}
            Err(error) => self.screen.report(&error),
        }
    }

    fn dispatch(&mut self, command: PendingCommand) {
        let job = command.job;
        let ticket = self.worker.submit(job, command.request);
        match job {
            PipelineJob::Log | PipelineJob::Diff => self.history_ticket = Some(ticket),
            PipelineJob::Grep => self.grep_ticket = Some(ticket),
        }
    }

    fn on_completion(&mut self, completion: Completion<PipelineJob>) {
        let Completion {
            ticket,
            tag: job,
            result,
        } = completion;

        match job {
            PipelineJob::Grep => {
                if self.grep_ticket != Some(ticket) {
                    tracing::debug!(?ticket, "dropping superseded grep completion");
                    return;
                }
                self.grep_ticket = None;
                if let Err(error) = self.grep.on_command_finished(job, result, &mut self.screen) {
                    self.screen.report(&error);
                }
            }
            PipelineJob::Log | PipelineJob::Diff => {
                if self.history_ticket != Some(ticket) {
                    tracing::debug!(?ticket, ?job, "dropping superseded completion");
                    return;
                }
                self.history_ticket = None;
                let next = self
                    .pipeline
                    .on_command_finished(job, result, &mut self.screen);
                if job == PipelineJob::Log && matches!(next, Ok(None)) {
                    let count = self.pipeline.navigator().len();
                    self.screen
                        .notify(Notification::info(format!("{count} changesets")));
                }
                self.dispatch_or_report(next);
            }
        }
    }
}
