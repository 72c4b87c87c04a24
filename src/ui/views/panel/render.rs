//! Rendering for the output panel

use ratatui::{
    prelude::*,
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::model::{Notification, Syntax};
use crate::ui::{components, theme};

use super::{LineKind, PanelView, classify_line};

impl PanelView {
    /// Header row, context bar, then the text
    pub fn render(&mut self, frame: &mut Frame, area: Rect, notification: Option<&Notification>) {
        self.sync();

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

        self.render_header(frame, chunks[0], notification);
        self.render_context_bar(frame, chunks[1]);
        self.render_text(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, notification: Option<&Notification>) {
        let label = if self.name.is_empty() {
            " hgcomb - Output ".to_string()
        } else {
            format!(" hgcomb - {} ", self.name)
        };
        let title = Line::from(label).bold().yellow().centered();

        let room = area.width.saturating_sub(title.width() as u16 + 4) as usize;
        let block = match notification
            .map(|n| components::build_notification_title(n, room))
            .filter(|line| !line.spans.is_empty())
        {
            Some(line) => components::header_block(title).title(line.right_aligned()),
            None => components::header_block(title),
        };
        frame.render_widget(block, area);
    }

    fn render_context_bar(&self, frame: &mut Frame, area: Rect) {
        let text = if self.syntax == Syntax::Diff {
            format!(" {}", self.current_context())
        } else {
            String::new()
        };
        let bar = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).bold(),
        )))
        .block(components::side_borders_block());
        frame.render_widget(bar, area);
    }

    fn render_text(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM);
        self.visible_height = area.height.saturating_sub(1) as usize;

        if self.lines.is_empty() {
            frame.render_widget(components::empty_panel_state().block(block), area);
            return;
        }

        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(self.visible_height)
            .map(|line| styled_line(line, self.syntax))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn styled_line(line: &str, syntax: Syntax) -> Line<'static> {
    let text = line.to_string();
    match classify_line(line, syntax) {
        LineKind::ChangesetHeader => Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::diff::CHANGESET_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        LineKind::FileHeader => Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::diff::FILE_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        LineKind::HunkHeader => Line::from(Span::styled(
            text,
            Style::default().fg(theme::diff::HUNK_HEADER),
        )),
        LineKind::Added => Line::from(Span::styled(text, Style::default().fg(theme::diff::ADDED))),
        LineKind::Removed => {
            Line::from(Span::styled(text, Style::default().fg(theme::diff::REMOVED)))
        }
        LineKind::GrepBanner => Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::grep::BANNER)
                .add_modifier(Modifier::BOLD),
        )),
        LineKind::Text => Line::from(text),
    }
}
