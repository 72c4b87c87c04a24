//! Changeset list view
//!
//! Shows the summaries offered by the pipeline and reports the pick back as a
//! [`ListAction`].

mod input;
mod render;

/// What the list asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    None,
    /// Diff of the changeset at this index
    Select(usize),
    /// Dismiss the list
    Cancel,
    Quit,
}

/// Changeset list state
#[derive(Debug, Default)]
pub struct ChangesetListView {
    items: Vec<String>,
    pub selected: usize,
    scroll_offset: usize,
    /// False once the list was dismissed; drawn dimmed
    active: bool,
    /// File the list belongs to (title)
    pub file_label: Option<String>,
    visible_height: usize,
}

pub mod empty_text {
    pub const TITLE: &str = "No changesets touch this file.";
}

impl ChangesetListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the offered items
    ///
    /// Offering the same list again keeps the cursor where it was.
    pub fn set_items(&mut self, items: Vec<String>) {
        if items != self.items {
            self.selected = 0;
            self.scroll_offset = 0;
        }
        self.items = items;
        self.active = true;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Move the cursor to `index` (clamped to the list)
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}
