//! Notification lines
//!
//! The same [`Notification`] is drawn two ways: a short label in a view's
//! title bar, or a banner above the status bar.

use ratatui::{
    prelude::*,
    text::{Line, Span},
};

use crate::model::{Notification, NotificationKind};

fn palette(kind: NotificationKind) -> (&'static str, Color) {
    match kind {
        NotificationKind::Info => ("Info:", Color::Cyan),
        NotificationKind::Warning => ("Warning:", Color::Yellow),
        NotificationKind::Error => ("Error:", Color::Red),
    }
}

/// Banner line: colored label, then the message
pub fn build_notification_line(notification: &Notification) -> Line<'static> {
    let (label, color) = palette(notification.kind);
    Line::from(vec![
        Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::Black).bg(color),
        ),
        Span::styled(
            format!(" {} ", notification.message),
            Style::default().fg(color),
        ),
    ])
}

/// Title-bar variant, truncated with "…" to fit `max_width` columns
///
/// Returns an empty line when not even one character of the message fits.
pub fn build_notification_title(notification: &Notification, max_width: usize) -> Line<'static> {
    let (label, color) = palette(notification.kind);
    // " | " + label + " " + message + " "
    let chrome = 3 + label.len() + 1 + 1;
    let message_width = notification.message.chars().count();

    let message = if chrome + message_width <= max_width {
        format!("{} ", notification.message)
    } else {
        let room = max_width.saturating_sub(chrome + 1);
        if room == 0 {
            return Line::default();
        }
        let kept: String = notification.message.chars().take(room).collect();
        format!("{kept}… ")
    };

    Line::from(vec![
        Span::raw(" | "),
        Span::styled(
            format!("{label} "),
            Style::default().fg(Color::Black).bg(color),
        ),
        Span::styled(message, Style::default().fg(color)),
    ])
}
