//! Error types for tzcal.

use thiserror::Error;

/// Errors that can occur in tzcal operations.
#[derive(Error, Debug)]
pub enum TzCalError {
    #[error("Please fill in all fields (missing: {0})")]
    Validation(String),

    #[error("Invalid date/time: {0}")]
    Conversion(String),

    #[error("Invalid share link: {0}")]
    Decode(String),

    #[error("Notifications blocked. Enable them in your notification settings to receive reminders.")]
    PermissionDenied,

    #[error("Notification permission not granted. You can enable it later with `tzcal notifications`.")]
    PermissionDismissed,

    #[error("Notifications are not supported on this system")]
    NotificationsUnsupported,

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TzCalError {
    /// Permission outcomes that leave reminders off without being a failure.
    pub fn is_permission(&self) -> bool {
        matches!(
            self,
            TzCalError::PermissionDenied
                | TzCalError::PermissionDismissed
                | TzCalError::NotificationsUnsupported
        )
    }
}

/// Result type alias for tzcal operations.
pub type TzCalResult<T> = Result<T, TzCalError>;
