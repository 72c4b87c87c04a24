//! Key handling for the output panel

use crossterm::event::KeyEvent;

use crate::keys;

use super::{PanelAction, PanelView};

impl PanelView {
    pub fn handle_key(&mut self, key: KeyEvent) -> PanelAction {
        if keys::is_half_page_down(&key) {
            self.scroll_half_page_down();
            return PanelAction::None;
        }
        if keys::is_half_page_up(&key) {
            self.scroll_half_page_up();
            return PanelAction::None;
        }

        match key.code {
            code if keys::is_move_down(code) => self.scroll_down(),
            code if keys::is_move_up(code) => self.scroll_up(),
            keys::GO_TOP => self.jump_to_top(),
            keys::GO_BOTTOM => self.jump_to_bottom(),
            keys::NEXT_FILE => self.next_file(),
            keys::PREV_FILE => self.prev_file(),
            keys::QUIT | keys::ESC => return PanelAction::Back,
            _ => {}
        }
        PanelAction::None
    }
}
