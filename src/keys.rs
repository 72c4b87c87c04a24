//! Keybinding definitions for hgcomb
//!
//! All keybindings live here so the views and the status bar agree.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::app::View;

// =============================================================================
// Key detection helpers (for modifier keys)
// =============================================================================

/// Ctrl+C, accepted in every view and prompt
pub fn is_interrupt(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Ctrl+D
pub fn is_half_page_down(key: &KeyEvent) -> bool {
    key.code == HALF_PAGE_DOWN && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Ctrl+U
pub fn is_half_page_up(key: &KeyEvent) -> bool {
    key.code == HALF_PAGE_UP && key.modifiers.contains(KeyModifiers::CONTROL)
}

// =============================================================================
// Global keys
// =============================================================================

/// Quit (from the list) or go back (from the panel)
pub const QUIT: KeyCode = KeyCode::Char('q');

/// Cancel / back
pub const ESC: KeyCode = KeyCode::Esc;

/// Switch between list and panel
pub const TAB: KeyCode = KeyCode::Tab;

/// Fetch the file's history again
pub const RELOAD: KeyCode = KeyCode::Char('r');

/// Grep the file's history
pub const GREP: KeyCode = KeyCode::Char('/');

// =============================================================================
// Navigation keys
// =============================================================================

pub const MOVE_UP: KeyCode = KeyCode::Char('k');
pub const MOVE_UP_ARROW: KeyCode = KeyCode::Up;
pub const MOVE_DOWN: KeyCode = KeyCode::Char('j');
pub const MOVE_DOWN_ARROW: KeyCode = KeyCode::Down;
pub const GO_TOP: KeyCode = KeyCode::Char('g');
pub const GO_BOTTOM: KeyCode = KeyCode::Char('G');

/// With Ctrl held
pub const HALF_PAGE_DOWN: KeyCode = KeyCode::Char('d');
/// With Ctrl held
pub const HALF_PAGE_UP: KeyCode = KeyCode::Char('u');

pub fn is_move_up(code: KeyCode) -> bool {
    matches!(code, MOVE_UP | MOVE_UP_ARROW)
}

pub fn is_move_down(code: KeyCode) -> bool {
    matches!(code, MOVE_DOWN | MOVE_DOWN_ARROW)
}

// =============================================================================
// Changeset list keys
// =============================================================================

/// Show the selected changeset's diff
pub const SELECT: KeyCode = KeyCode::Enter;

// =============================================================================
// Output panel keys
// =============================================================================

/// Jump to the next file in a patch
pub const NEXT_FILE: KeyCode = KeyCode::Char(']');

/// Jump to the previous file in a patch
pub const PREV_FILE: KeyCode = KeyCode::Char('[');

// =============================================================================
// Prompt keys
// =============================================================================

pub const SUBMIT: KeyCode = KeyCode::Enter;

// =============================================================================
// Status bar hints
// =============================================================================

/// One entry of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Color,
}

pub const CHANGESET_LIST_HINTS: &[KeyHint] = &[
    KeyHint {
        key: "j/k",
        label: "Move",
        color: Color::Blue,
    },
    KeyHint {
        key: "Enter",
        label: "Diff",
        color: Color::Green,
    },
    KeyHint {
        key: "/",
        label: "Grep",
        color: Color::Yellow,
    },
    KeyHint {
        key: "r",
        label: "Reload",
        color: Color::Magenta,
    },
    KeyHint {
        key: "Tab",
        label: "Panel",
        color: Color::Cyan,
    },
    KeyHint {
        key: "q",
        label: "Quit",
        color: Color::Red,
    },
];

pub const PANEL_HINTS: &[KeyHint] = &[
    KeyHint {
        key: "j/k",
        label: "Scroll",
        color: Color::Blue,
    },
    KeyHint {
        key: "]/[",
        label: "File",
        color: Color::Cyan,
    },
    KeyHint {
        key: "/",
        label: "Grep",
        color: Color::Yellow,
    },
    KeyHint {
        key: "q",
        label: "Back",
        color: Color::Red,
    },
];

pub const PROMPT_HINTS: &[KeyHint] = &[
    KeyHint {
        key: "Enter",
        label: "Submit",
        color: Color::Green,
    },
    KeyHint {
        key: "Esc",
        label: "Cancel",
        color: Color::Red,
    },
];

/// Hints for the current view; an open prompt takes precedence
pub fn current_hints(view: View, prompt_open: bool) -> &'static [KeyHint] {
    if prompt_open {
        return PROMPT_HINTS;
    }
    match view {
        View::ChangesetList => CHANGESET_LIST_HINTS,
        View::Panel => PANEL_HINTS,
    }
}
