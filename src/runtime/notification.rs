use std::time::Duration;

use chrono::{DateTime, Utc};

/// Transient footer message with a wall-clock expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// At most one notice is shown; a new one replaces the old.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    current: Option<Notice>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>, duration: Duration) {
        let ttl = chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.current = Some(Notice {
            message: message.into(),
            expires_at,
        });
    }

    /// The active message, clearing the notice once `now` reaches its expiry.
    pub fn active(&mut self, now: DateTime<Utc>) -> Option<&str> {
        if self
            .current
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at)
        {
            self.current = None;
        }
        self.current.as_ref().map(|notice| notice.message.as_str())
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
