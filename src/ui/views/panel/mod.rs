//! Output panel view
//!
//! Mirrors one named [`OutputPanel`](crate::model::OutputPanel). The text is
//! re-read whenever the panel's revision moves, so writers never talk to the
//! view directly.

mod input;
mod render;

use std::sync::LazyLock;

use regex::Regex;

use crate::hg::constants::GREP_BANNER;
use crate::model::{PanelHandle, Syntax};
use crate::ui::navigation;

/// `diff -r 1a2b -r 3c4d path` (plain hg) or `diff --git a/path b/path`
static FILE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^diff (?:--git a/\S+ b/(\S+)|(?:-r \S+ )+(.+))$")
        .expect("Invalid file header regex")
});

/// `3:a1b2c3 [Alice 2023-01-01]`, written above each patch
static CHANGESET_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:[0-9a-f]+ \[").expect("Invalid changeset header regex"));

/// Action returned by the panel's key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    None,
    /// Return to the changeset list
    Back,
}

/// How a panel line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    ChangesetHeader,
    FileHeader,
    HunkHeader,
    Added,
    Removed,
    GrepBanner,
    Text,
}

/// Classify one line of panel text
///
/// Diff markers only count in a panel tagged [`Syntax::Diff`].
pub fn classify_line(line: &str, syntax: Syntax) -> LineKind {
    if line.starts_with(GREP_BANNER) {
        return LineKind::GrepBanner;
    }
    if syntax != Syntax::Diff {
        return LineKind::Text;
    }
    if CHANGESET_HEADER_REGEX.is_match(line) {
        LineKind::ChangesetHeader
    } else if line.starts_with("diff ") || line.starts_with("+++") || line.starts_with("---") {
        LineKind::FileHeader
    } else if line.starts_with("@@") {
        LineKind::HunkHeader
    } else if line.starts_with('+') {
        LineKind::Added
    } else if line.starts_with('-') {
        LineKind::Removed
    } else {
        LineKind::Text
    }
}

/// Start of one file's patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnchor {
    pub line: usize,
    pub path: String,
}

fn find_file_anchors(lines: &[String]) -> Vec<FileAnchor> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line, text)| {
            let captures = FILE_HEADER_REGEX.captures(text)?;
            let path = captures.get(1).or_else(|| captures.get(2))?;
            Some(FileAnchor {
                line,
                path: path.as_str().to_string(),
            })
        })
        .collect()
}

/// Output panel view state
#[derive(Debug, Default)]
pub struct PanelView {
    handle: Option<PanelHandle>,
    /// Panel revision the cached lines were read at
    seen_revision: Option<u64>,
    name: String,
    text: String,
    pub lines: Vec<String>,
    pub syntax: Syntax,
    pub anchors: Vec<FileAnchor>,
    pub scroll_offset: usize,
    pub current_file_index: usize,
    visible_height: usize,
}

impl PanelView {
    const DEFAULT_VISIBLE_HEIGHT: usize = 20;

    pub fn new() -> Self {
        Self {
            visible_height: Self::DEFAULT_VISIBLE_HEIGHT,
            ..Self::default()
        }
    }

    /// Mirror `handle` from now on
    pub fn attach(&mut self, handle: PanelHandle) {
        let name = handle.lock().name().to_string();
        if self.handle.is_none() || name != self.name {
            self.seen_revision = None;
            self.text.clear();
        }
        self.handle = Some(handle);
        self.sync();
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Re-read the panel if it changed since the last look
    ///
    /// Text that extends the previous text (append mode) scrolls to the new
    /// part; anything else starts from the top.
    pub fn sync(&mut self) {
        let Some(handle) = &self.handle else {
            return;
        };
        let panel = handle.lock();
        if self.seen_revision == Some(panel.revision()) {
            return;
        }

        let appended = !self.text.is_empty() && panel.text().starts_with(&self.text);
        let first_new_line = self.lines.len();

        self.seen_revision = Some(panel.revision());
        self.name = panel.name().to_string();
        self.text = panel.text().to_string();
        self.syntax = panel.syntax();
        drop(panel);

        self.lines = self.text.lines().map(str::to_string).collect();
        self.anchors = find_file_anchors(&self.lines);
        self.scroll_offset = if appended {
            first_new_line.min(self.max_scroll_offset())
        } else {
            0
        };
        self.update_current_file_index();
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn current_file(&self) -> Option<&FileAnchor> {
        self.anchors.get(self.current_file_index)
    }

    /// `path [i/n]` for the context bar
    pub fn current_context(&self) -> String {
        match self.current_file() {
            Some(anchor) => format!(
                "{} [{}/{}]",
                anchor.path,
                self.current_file_index + 1,
                self.anchors.len()
            ),
            None => "(no files)".to_string(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn max_scroll_offset(&self) -> usize {
        navigation::max_offset(self.total_lines(), self.visible_height)
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll_offset());
        self.update_current_file_index();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.update_current_file_index();
    }

    pub fn scroll_half_page_down(&mut self) {
        let half = self.visible_height / 2;
        self.scroll_offset = (self.scroll_offset + half).min(self.max_scroll_offset());
        self.update_current_file_index();
    }

    pub fn scroll_half_page_up(&mut self) {
        let half = self.visible_height / 2;
        self.scroll_offset = self.scroll_offset.saturating_sub(half);
        self.update_current_file_index();
    }

    pub fn jump_to_top(&mut self) {
        self.scroll_offset = 0;
        self.update_current_file_index();
    }

    pub fn jump_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll_offset();
        self.update_current_file_index();
    }

    /// Scroll to the next file header, wrapping to the first
    pub fn next_file(&mut self) {
        let target = self
            .anchors
            .iter()
            .position(|a| a.line > self.scroll_offset)
            .or(if self.anchors.is_empty() { None } else { Some(0) });
        if let Some(index) = target {
            self.scroll_offset = self.anchors[index].line;
            self.current_file_index = index;
        }
    }

    /// Scroll to the previous file header, wrapping to the last
    pub fn prev_file(&mut self) {
        let target = self
            .anchors
            .iter()
            .rposition(|a| a.line < self.scroll_offset)
            .or(self.anchors.len().checked_sub(1));
        if let Some(index) = target {
            self.scroll_offset = self.anchors[index].line;
            self.current_file_index = index;
        }
    }

    fn update_current_file_index(&mut self) {
        self.current_file_index = self
            .anchors
            .iter()
            .rposition(|a| a.line <= self.scroll_offset)
            .unwrap_or(0);
    }
}
