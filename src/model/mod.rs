//! Data models for hgcomb
//!
//! UI-independent data structures: changesets, the navigator over them,
//! output panels, and notifications.

mod changeset;
mod navigator;
mod notification;
mod panel;

pub use changeset::{ChangesetRecord, DEFAULT_BRANCH};
pub use navigator::{Advance, AdvancePolicy, ChangesetNavigator, NavigatorError};
pub use notification::{Notification, NotificationKind};
pub use panel::{OutputPanel, PanelHandle, PanelRegistry, Syntax, WriteMode};
