//! Rendering logic for the application

use ratatui::{Frame, prelude::*};

use super::state::App;
use super::surface::View;
use crate::keys;
use crate::model::NotificationKind;
use crate::ui::widgets::{build_status_bar, render_notification_banner, render_status_bar};

/// Rows taken by an open prompt (text plus borders)
const PROMPT_HEIGHT: u16 = 3;

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Clone to avoid borrowing the screen while a view renders into it
        let notification = self
            .screen
            .notification
            .as_ref()
            .filter(|n| !n.is_expired())
            .cloned();

        let prompt_height = if self.screen.prompt.is_some() {
            PROMPT_HEIGHT
        } else {
            0
        };
        let [main, prompt_area, status] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(prompt_height),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        match self.screen.view {
            View::ChangesetList => {
                self.screen
                    .changesets
                    .render(frame, main, notification.as_ref());
            }
            View::Panel => self.screen.panel.render(frame, main, notification.as_ref()),
        }

        if let Some(prompt) = &self.screen.prompt {
            prompt.render(frame, prompt_area);
        }

        // Warnings and errors are also shown prominently above the status bar
        if let Some(n) = notification
            .as_ref()
            .filter(|n| n.kind != NotificationKind::Info)
        {
            render_notification_banner(frame, main, n);
        }

        let hints = keys::current_hints(self.screen.view, self.screen.prompt.is_some());
        render_status_bar(frame, status, build_status_bar(self.status_prefix(), hints));
    }

    fn status_prefix(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if self.is_busy() {
            spans.push(Span::styled(
                " hg running… ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
        }
        let context = match self.screen.view {
            View::ChangesetList => self.file().map(|f| f.display().to_string()),
            View::Panel => self
                .screen
                .panel
                .is_attached()
                .then(|| self.screen.panel.current_context()),
        };
        if let Some(context) = context {
            spans.push(Span::styled(
                format!(" {context} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans
    }
}
