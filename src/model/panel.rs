//! Output panel model
//!
//! The output panel is the one piece of state shared by every pipeline:
//! each named panel lives behind a mutex so only one writer touches it at a
//! time. Panels are created on demand through a [`PanelRegistry`] that the
//! owner hands to whoever needs to write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Syntax tag applied to panel content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    #[default]
    Plain,
    /// Unified diff / patch output
    Diff,
}

/// How new text lands in the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Clear, then write at offset 0
    #[default]
    Replace,
    /// Write after the current content
    Append,
}

/// Text content of one named panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPanel {
    name: String,
    text: String,
    syntax: Syntax,
    /// Bumped on every mutation so views can tell when to re-layout
    revision: u64,
}

impl OutputPanel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Length of the content in bytes
    pub fn size(&self) -> usize {
        self.text.len()
    }

    /// Insert `text` at byte `offset`
    ///
    /// The offset is clamped to the content length and moved back to the
    /// nearest char boundary.
    pub fn append(&mut self, text: &str, offset: usize) {
        let mut at = offset.min(self.text.len());
        while !self.text.is_char_boundary(at) {
            at -= 1;
        }
        self.text.insert_str(at, text);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.revision += 1;
    }

    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = syntax;
        self.revision += 1;
    }

    pub fn write(&mut self, text: &str, mode: WriteMode) {
        match mode {
            WriteMode::Replace => {
                self.clear();
                self.append(text, 0);
            }
            WriteMode::Append => {
                let end = self.size();
                self.append(text, end);
            }
        }
    }
}

/// Shared handle to a named panel
#[derive(Debug, Clone)]
pub struct PanelHandle {
    inner: Arc<Mutex<OutputPanel>>,
}

impl PanelHandle {
    fn new(panel: OutputPanel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(panel)),
        }
    }

    /// Exclusive access to the panel
    ///
    /// A writer that panicked mid-update leaves the text as-is; it is still
    /// valid UTF-8, so the poison is ignored.
    pub fn lock(&self) -> MutexGuard<'_, OutputPanel> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, text: &str, offset: usize) {
        self.lock().append(text, offset);
    }

    pub fn write(&self, text: &str, mode: WriteMode) {
        self.lock().write(text, mode);
    }

    pub fn set_syntax(&self, syntax: Syntax) {
        self.lock().set_syntax(syntax);
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    /// Copy of the current text
    pub fn text(&self) -> String {
        self.lock().text().to_string()
    }

    /// Copy of the whole panel
    pub fn snapshot(&self) -> OutputPanel {
        self.lock().clone()
    }
}

/// Owner of all named panels
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: Arc<Mutex<HashMap<String, PanelHandle>>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel called `name`, created empty if it does not exist yet
    pub fn create_if_absent(&self, name: &str) -> PanelHandle {
        let mut panels = self.panels.lock().unwrap_or_else(PoisonError::into_inner);
        panels
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(panel = name, "creating output panel");
                PanelHandle::new(OutputPanel::new(name))
            })
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<PanelHandle> {
        self.panels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
