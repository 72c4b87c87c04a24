//! Screen state behind the presentation surface

use crate::hg::HgError;
use crate::model::{Notification, PanelRegistry};
use crate::pipeline::{InputPrompt, PresentationSurface};
use crate::ui::views::{ChangesetListView, PanelView, PromptView};

/// Available views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    ChangesetList,
    Panel,
}

/// Everything on screen
///
/// Kept apart from the pipeline so a completion can be fed to the pipeline
/// while the pipeline draws into the screen.
#[derive(Debug)]
pub struct Screen {
    pub view: View,
    pub changesets: ChangesetListView,
    pub panel: PanelView,
    /// Modal prompt; takes every key while open
    pub prompt: Option<PromptView>,
    pub notification: Option<Notification>,
    panels: PanelRegistry,
}

impl Screen {
    pub fn new(panels: PanelRegistry) -> Self {
        Self {
            view: View::ChangesetList,
            changesets: ChangesetListView::new(),
            panel: PanelView::new(),
            prompt: None,
            notification: None,
            panels,
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub(crate) fn clear_expired_notification(&mut self) {
        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
        }
    }
}

impl PresentationSurface for Screen {
    fn show_selection_list(&mut self, items: Vec<String>) {
        self.changesets.set_items(items);
        self.view = View::ChangesetList;
    }

    fn show_panel(&mut self, name: &str) {
        match self.panels.get(name) {
            Some(handle) => {
                self.panel.attach(handle);
                self.view = View::Panel;
            }
            None => tracing::warn!(panel = name, "asked to show a panel that does not exist"),
        }
    }

    fn show_input_prompt(&mut self, prompt: InputPrompt) {
        self.prompt = Some(PromptView::new(prompt));
    }

    fn report(&mut self, error: &HgError) {
        self.notify(Notification::from_error(error));
    }
}
