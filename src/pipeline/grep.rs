//! One-shot grep through a file's history
//!
//! No parsing: `hg grep` output goes straight into the output panel under a
//! short banner.

use std::path::{Path, PathBuf};

use super::{PendingCommand, PipelineConfig, PipelineJob, PresentationSurface, working_dir_of};
use crate::hg::HgError;
use crate::hg::constants::GREP_BANNER;
use crate::model::{PanelRegistry, Syntax};

/// Grep currently in flight
#[derive(Debug, Clone)]
struct Running {
    pattern: String,
    file: PathBuf,
}

/// Grep flow, independent of any history run
#[derive(Debug)]
pub struct GrepFlow {
    config: PipelineConfig,
    panels: PanelRegistry,
    running: Option<Running>,
}

impl GrepFlow {
    pub fn new(config: PipelineConfig, panels: PanelRegistry) -> Self {
        Self {
            config,
            panels,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start grepping `file`'s history for `pattern`
    ///
    /// A blank pattern is `NoSelection`; a missing file is `UnsavedFile`.
    pub fn begin(&mut self, pattern: &str, file: Option<&Path>) -> Result<PendingCommand, HgError> {
        self.running = None;
        if pattern.trim().is_empty() {
            tracing::warn!("grep requested with nothing to search for");
            return Err(HgError::NoSelection);
        }
        let Some(file) = file else {
            tracing::warn!("grep requested for an unsaved file");
            return Err(HgError::UnsavedFile);
        };

        let command_line = self
            .config
            .commands
            .grep(pattern, file, self.config.grep_ignore_case)?;
        let request = self.config.request(command_line, &working_dir_of(file));

        tracing::info!(pattern, file = %file.display(), "grepping history");
        self.running = Some(Running {
            pattern: pattern.to_string(),
            file: file.to_path_buf(),
        });

        Ok(PendingCommand {
            job: PipelineJob::Grep,
            request,
        })
    }

    /// Write the finished grep into the panel
    pub fn on_command_finished(
        &mut self,
        job: PipelineJob,
        result: Result<String, HgError>,
        surface: &mut dyn PresentationSurface,
    ) -> Result<(), HgError> {
        if job != PipelineJob::Grep {
            return Ok(());
        }
        let Some(running) = self.running.take() else {
            tracing::debug!("ignoring grep completion with no grep running");
            return Ok(());
        };

        let output = result.inspect_err(|error| {
            tracing::warn!(%error, pattern = %running.pattern, "grep failed");
        })?;
        let text = format!(
            "{} Grepping for \"{}\" in {}\n---\n{}",
            GREP_BANNER,
            running.pattern,
            running.file.display(),
            output
        );

        let panel = self.panels.create_if_absent(&self.config.panel_name);
        {
            let mut panel = panel.lock();
            panel.set_syntax(Syntax::Plain);
            panel.write(&text, self.config.write_mode);
        }
        surface.show_panel(&self.config.panel_name);
        Ok(())
    }
}
