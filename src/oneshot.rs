//! Line-oriented subcommands
//!
//! `show` and `grep` drive the same pipelines as the terminal UI, but run
//! each command inline and print to a writer instead of drawing.

use std::io::{self, Write};
use std::path::Path;

use crate::hg::{CommandExecutor, HgError};
use crate::model::PanelRegistry;
use crate::pipeline::{
    GrepFlow, HistoryPipeline, InputPrompt, PendingCommand, PipelineConfig, PresentationSurface,
};

/// Surface printing lists and panels as plain lines
struct LineSurface<'a, W: Write> {
    out: &'a mut W,
    panels: PanelRegistry,
    /// Print the changeset list when offered
    print_list: bool,
    /// First write error; surface methods cannot return one
    error: Option<io::Error>,
}

impl<'a, W: Write> LineSurface<'a, W> {
    fn new(out: &'a mut W, panels: PanelRegistry, print_list: bool) -> Self {
        Self {
            out,
            panels,
            print_list,
            error: None,
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(error) = result {
            self.error.get_or_insert(error);
        }
    }

    fn finish(self) -> Result<(), HgError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

impl<W: Write> PresentationSurface for LineSurface<'_, W> {
    fn show_selection_list(&mut self, items: Vec<String>) {
        if !self.print_list {
            return;
        }
        let result = items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| writeln!(self.out, "{i:>3}  {item}"));
        self.record(result);
    }

    fn show_panel(&mut self, name: &str) {
        let Some(panel) = self.panels.get(name) else {
            return;
        };
        let text = panel.text();
        let result = self.out.write_all(text.as_bytes());
        self.record(result);
    }

    fn show_input_prompt(&mut self, prompt: InputPrompt) {
        tracing::debug!(label = %prompt.label, "no prompts outside the terminal UI");
    }
}

fn run(executor: &dyn CommandExecutor, command: &PendingCommand) -> Result<String, HgError> {
    tracing::debug!(command = %command.request.command_line, "running inline");
    executor.execute(&command.request)
}

/// Print `file`'s changesets, or with `index` the diff of that changeset
pub fn run_show<W: Write>(
    config: PipelineConfig,
    executor: &dyn CommandExecutor,
    file: &Path,
    index: Option<usize>,
    out: &mut W,
) -> Result<(), HgError> {
    let panels = PanelRegistry::new();
    let mut pipeline = HistoryPipeline::new(
        PipelineConfig {
            prompt_for_next: false,
            ..config
        },
        panels.clone(),
    );
    let mut surface = LineSurface::new(out, panels, index.is_none());

    let log = pipeline.begin_history(Some(file))?;
    let output = run(executor, &log);
    pipeline.on_command_finished(log.job, output, &mut surface)?;

    if let Some(index) = index
        && let Some(diff) = pipeline.on_selection(Some(index))?
    {
        let output = run(executor, &diff);
        pipeline.on_command_finished(diff.job, output, &mut surface)?;
    }
    surface.finish()
}

/// Print the grep of `file`'s history for `pattern`
pub fn run_grep<W: Write>(
    config: PipelineConfig,
    executor: &dyn CommandExecutor,
    pattern: &str,
    file: &Path,
    out: &mut W,
) -> Result<(), HgError> {
    let panels = PanelRegistry::new();
    let mut grep = GrepFlow::new(config, panels.clone());
    let mut surface = LineSurface::new(out, panels, false);

    let command = grep.begin(pattern, Some(file))?;
    let output = run(executor, &command);
    grep.on_command_finished(command.job, output, &mut surface)?;
    surface.finish()
}
