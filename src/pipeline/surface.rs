//! Presentation surface seam
//!
//! The pipeline never draws anything itself. It writes panel text through
//! the shared [`PanelRegistry`](crate::model::PanelRegistry) and asks the
//! surface to show lists, panels and prompts. Answers (a picked index, a
//! submitted prompt) come back later as calls into the pipeline.

use crate::hg::HgError;

/// Which prompt an input event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptId {
    /// "Search next changeset?" after a diff was shown
    NextChangeset,
    /// Pattern entry for grep
    GrepPattern,
}

/// Request to show a single-line input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub id: PromptId,
    pub label: String,
    /// Hint shown while the input is empty
    pub placeholder: String,
}

impl InputPrompt {
    pub fn next_changeset(summary: &str) -> Self {
        Self {
            id: PromptId::NextChangeset,
            label: format!("Search next changeset? ({summary})"),
            placeholder: "[Enter] to search. [Escape] to cancel.".to_string(),
        }
    }

    pub fn grep_pattern() -> Self {
        Self {
            id: PromptId::GrepPattern,
            label: "Grep file history for".to_string(),
            placeholder: "pattern".to_string(),
        }
    }
}

/// What the user did with an input prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Text changed while typing
    Changed(String),
    /// Enter pressed
    Submitted(String),
    /// Escape pressed
    Cancelled,
}

/// Host UI operations the pipeline drives
pub trait PresentationSurface {
    /// Offer `items` for picking; the answer arrives via
    /// [`HistoryPipeline::on_selection`](super::HistoryPipeline::on_selection)
    fn show_selection_list(&mut self, items: Vec<String>);

    /// Bring the named output panel to front
    fn show_panel(&mut self, name: &str);

    /// Open a single-line prompt
    fn show_input_prompt(&mut self, prompt: InputPrompt);

    /// Visible status for a failure; the default only logs
    fn report(&mut self, error: &HgError) {
        tracing::debug!(%error, "surface has no status line");
    }
}
