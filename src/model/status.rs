//! Transient status line
//!
//! Feedback for the user about the last operation. Messages expire on their
//! own; nothing in the data model depends on them.

use std::time::{Duration, Instant};

/// Default lifetime of a status message
pub const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// A temporary message displayed in the status line
#[derive(Debug, Clone)]
pub struct TransientMessage {
    /// The message text
    pub text: String,
    pub level: StatusLevel,
    /// When this message expires
    pub expires_at: Instant,
}

impl TransientMessage {
    /// Create a new transient message with the given duration
    pub fn new(text: impl Into<String>, level: StatusLevel, duration: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Info, STATUS_DURATION)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Warning, STATUS_DURATION)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error, STATUS_DURATION)
    }

    /// Check if this message has expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_expires_immediately() {
        let msg = TransientMessage::new("done", StatusLevel::Info, Duration::ZERO);
        assert!(msg.is_expired());
    }

    #[test]
    fn test_default_duration_is_live() {
        let msg = TransientMessage::error("bad");
        assert_eq!(msg.level, StatusLevel::Error);
        assert!(!msg.is_expired());
    }
}
