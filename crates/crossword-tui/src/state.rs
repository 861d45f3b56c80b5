use crate::error::Severity;
use crate::session::SolveSession;
use std::collections::VecDeque;

/// A message waiting to be shown in a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Everything the interactive thread displays that a solve can change.
///
/// Only the interactive thread holds this; workers reach it through
/// [`crate::bridge::Poster`].
#[derive(Debug)]
pub struct UiState {
    /// Current (or last finished) solve attempt
    pub session: SolveSession,
    /// Rendered result grid, empty when there is nothing to show
    pub output: String,
    /// Pending dialogs, oldest first
    pub notifications: VecDeque<Notification>,
    /// Whether the Solve trigger accepts input
    pub trigger_enabled: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            session: SolveSession::idle(),
            output: String::new(),
            notifications: VecDeque::new(),
            trigger_enabled: true,
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    /// Dialog currently on screen
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }
}
