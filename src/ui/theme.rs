//! Color theme definitions
//!
//! Centralized color constants for consistent UI appearance.

use ratatui::style::Color;

/// Colors for the changeset list
pub mod changeset_list {
    use super::*;

    /// "Author 2 days ago:" part of an item
    pub const AGE: Color = Color::DarkGray;
}

/// Colors for patch text in the output panel
pub mod diff {
    use super::*;

    pub const ADDED: Color = Color::Green;
    pub const REMOVED: Color = Color::Red;
    pub const HUNK_HEADER: Color = Color::Cyan;
    /// `diff -r ...` and `changeset:` lines
    pub const FILE_HEADER: Color = Color::Yellow;
    /// `rev:node [author date]` header written above each patch
    pub const CHANGESET_HEADER: Color = Color::Magenta;
}

/// Colors for the grep banner
pub mod grep {
    use super::*;

    pub const BANNER: Color = Color::Cyan;
}

/// Selected row
pub mod selection {
    use super::*;

    pub const FG: Color = Color::White;
    pub const BG: Color = Color::DarkGray;
}
