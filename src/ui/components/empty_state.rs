//! Placeholders shown when a view has nothing to draw

use ratatui::{style::Stylize, text::Line, widgets::Paragraph};

/// Centered message with an optional gray hint below it
pub fn empty_state(title: &str, hint: Option<&str>) -> Paragraph<'static> {
    let mut lines = vec![Line::from(""), Line::from(title.to_string()).centered()];

    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(hint.to_string()).dark_gray().centered());
    }

    Paragraph::new(lines)
}

/// The log came back empty (new file, or never committed)
pub fn no_changesets_state() -> Paragraph<'static> {
    empty_state(
        "No changesets touch this file.",
        Some("Hint: commit the file, or press r to reload"),
    )
}

/// Nothing has been written to the panel yet
pub fn empty_panel_state() -> Paragraph<'static> {
    empty_state(
        "Nothing to show yet.",
        Some("Pick a changeset, or press / to grep"),
    )
}
