//! Input handling for the application

use crossterm::event::KeyEvent;

use super::state::App;
use super::surface::View;
use crate::keys;
use crate::pipeline::{InputPrompt, PromptEvent, PromptId};
use crate::ui::views::{ListAction, PanelAction, PromptView};

impl App {
    /// Handle key events
    pub fn on_key_event(&mut self, key: KeyEvent) {
        if keys::is_interrupt(&key) {
            self.quit();
            return;
        }

        // Any key dismisses the current notification
        self.screen.notification = None;

        // An open prompt is modal
        if self.screen.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        if self.handle_global_key(key) {
            return;
        }

        match self.screen.view {
            View::ChangesetList => {
                let action = self.screen.changesets.handle_key(key);
                self.handle_list_action(action);
            }
            View::Panel => {
                if self.screen.panel.handle_key(key) == PanelAction::Back {
                    self.show_list();
                }
            }
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            keys::TAB => {
                match self.screen.view {
                    View::ChangesetList => self.show_output_panel(),
                    View::Panel => self.show_list(),
                }
                true
            }
            keys::RELOAD => {
                self.begin_history();
                true
            }
            keys::GREP => {
                self.screen.prompt = Some(PromptView::new(InputPrompt::grep_pattern()));
                true
            }
            _ => false,
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.screen.prompt.as_mut() else {
            return;
        };
        let id = prompt.id();
        let Some(event) = prompt.handle_key(key) else {
            return;
        };
        if matches!(event, PromptEvent::Submitted(_) | PromptEvent::Cancelled) {
            self.screen.prompt = None;
        }

        match id {
            PromptId::NextChangeset => {
                let command = self.pipeline.on_next_prompt(event);
                self.dispatch_or_report(command);
            }
            PromptId::GrepPattern => {
                if let PromptEvent::Submitted(pattern) = event {
                    self.begin_grep(&pattern);
                }
            }
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::None => {}
            ListAction::Select(index) => self.select_changeset(index),
            ListAction::Cancel => self.dismiss_list(),
            ListAction::Quit => self.quit(),
        }
    }
}
