//! Rendering for the changeset list

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::Notification;
use crate::ui::{components, navigation, theme};

use super::{ChangesetListView, empty_text};

impl ChangesetListView {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, notification: Option<&Notification>) {
        let title = self.build_title();
        let room = area.width.saturating_sub(title.width() as u16 + 4) as usize;
        let notif_line = notification
            .map(|n| components::build_notification_title(n, room))
            .filter(|line| !line.spans.is_empty());
        let block = components::bordered_block_with_notification(title, notif_line);

        if self.items.is_empty() {
            let empty = components::empty_state(empty_text::TITLE, None).block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.visible_height = area.height.saturating_sub(2) as usize;
        self.scroll_offset =
            navigation::adjust_scroll(self.selected, self.scroll_offset, self.visible_height);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.visible_height)
            .map(|(index, item)| self.build_item_line(item, index == self.selected))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn build_title(&self) -> Line<'static> {
        let text = match &self.file_label {
            Some(file) => format!(" hgcomb - {} [{}] ", file, self.items.len()),
            None => " hgcomb ".to_string(),
        };
        let title = Line::from(text).bold().centered();
        if self.active { title.cyan() } else { title.dark_gray() }
    }

    /// `author age` is dimmed; the description after the first `": "` is not
    fn build_item_line(&self, item: &str, is_selected: bool) -> Line<'static> {
        let spans = match item.split_once(": ") {
            Some((who, description)) => vec![
                Span::styled(
                    format!("{who}: "),
                    Style::default().fg(theme::changeset_list::AGE),
                ),
                Span::raw(description.to_string()),
            ],
            None => vec![Span::raw(item.to_string())],
        };
        let line = Line::from(spans);

        if !self.active {
            line.style(Style::default().fg(Color::DarkGray))
        } else if is_selected {
            line.style(
                Style::default()
                    .fg(theme::selection::FG)
                    .bg(theme::selection::BG)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            line
        }
    }
}
