//! Views: the changeset list, the output panel and the input prompt

mod changesets;
mod panel;
mod prompt;

pub use changesets::{ChangesetListView, ListAction};
pub use panel::{FileAnchor, LineKind, PanelAction, PanelView, classify_line};
pub use prompt::PromptView;
