//! Notification banner widget
//!
//! Errors and warnings from the pipeline land here, one row above the
//! status bar, until they expire or the next key press.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::model::Notification;
use crate::ui::components;

/// Draw `notification` just above the bottom row of `area`
pub fn render_notification_banner(frame: &mut Frame, area: Rect, notification: &Notification) {
    if area.height < 3 {
        return;
    }
    let banner = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let line = components::build_notification_line(notification);
    frame.render_widget(Paragraph::new(line), banner);
}
