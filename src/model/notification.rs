//! Notification model
//!
//! Short-lived status messages (diagnostics, "copied", "no more changesets").

use std::time::{Duration, Instant};

use crate::hg::HgError;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Kind of notification (determines color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational (cyan)
    Info,
    /// Nothing went wrong but there is nothing to do (yellow)
    Warning,
    /// A command or parse failed (red)
    Error,
}

/// A notification to display to the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    /// Status message for a failed pipeline step
    ///
    /// Only the first line is kept; hg error output can be long.
    pub fn from_error(error: &HgError) -> Self {
        let kind = match error {
            HgError::NoSelection | HgError::UnsavedFile => NotificationKind::Warning,
            _ => NotificationKind::Error,
        };
        let text = error.to_string();
        let first_line = text.lines().next().unwrap_or_default().to_string();
        Self::new(first_line, kind)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= NOTIFICATION_TTL
    }
}
