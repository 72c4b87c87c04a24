//! Block helpers shared by the views

use ratatui::{
    text::Line,
    widgets::{Block, Borders},
};

/// Block with all borders and a title
pub fn bordered_block<'a>(title: Line<'a>) -> Block<'a> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Bordered block with an optional right-aligned notification in the title bar
pub fn bordered_block_with_notification<'a>(
    title: Line<'a>,
    notification: Option<Line<'a>>,
) -> Block<'a> {
    let block = bordered_block(title);
    match notification {
        Some(line) => block.title(line.right_aligned()),
        None => block,
    }
}

/// Top, left and right borders (a header above a continuation section)
pub fn header_block<'a>(title: Line<'a>) -> Block<'a> {
    Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .title(title)
}

/// Left and right borders only
pub fn side_borders_block() -> Block<'static> {
    Block::default().borders(Borders::LEFT | Borders::RIGHT)
}
