//! Single-line input prompt
//!
//! Wraps a [`TextArea`] and turns key presses into [`PromptEvent`]s for
//! whichever flow opened the prompt.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect, style::Style, style::Stylize, text::Line};
use tui_textarea::TextArea;

use crate::keys;
use crate::pipeline::{InputPrompt, PromptEvent, PromptId};
use crate::ui::components;

#[derive(Debug)]
pub struct PromptView {
    prompt: InputPrompt,
    textarea: TextArea<'static>,
}

impl PromptView {
    pub fn new(prompt: InputPrompt) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(prompt.placeholder.clone());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(components::bordered_block(
            Line::from(format!(" {} ", prompt.label)).bold().yellow(),
        ));
        Self { prompt, textarea }
    }

    pub fn id(&self) -> PromptId {
        self.prompt.id
    }

    pub fn label(&self) -> &str {
        &self.prompt.label
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    /// `None` when the key changed nothing
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptEvent> {
        match key.code {
            keys::SUBMIT => Some(PromptEvent::Submitted(self.text())),
            keys::ESC => Some(PromptEvent::Cancelled),
            _ => self
                .textarea
                .input(key)
                .then(|| PromptEvent::Changed(self.text())),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
