//! Key handling for the changeset list

use crossterm::event::KeyEvent;

use crate::keys;
use crate::ui::navigation;

use super::{ChangesetListView, ListAction};

impl ChangesetListView {
    pub fn handle_key(&mut self, key: KeyEvent) -> ListAction {
        let last = self.items.len().saturating_sub(1);
        match key.code {
            code if keys::is_move_down(code) => {
                self.selected = navigation::select_next(self.selected, last);
                ListAction::None
            }
            code if keys::is_move_up(code) => {
                self.selected = navigation::select_prev(self.selected);
                ListAction::None
            }
            keys::GO_TOP => {
                self.selected = 0;
                ListAction::None
            }
            keys::GO_BOTTOM => {
                self.selected = last;
                ListAction::None
            }
            keys::SELECT if !self.items.is_empty() => ListAction::Select(self.selected),
            keys::ESC => ListAction::Cancel,
            keys::QUIT => ListAction::Quit,
            _ => ListAction::None,
        }
    }
}
