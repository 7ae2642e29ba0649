//! Transient user notifications.

use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// Holds the one visible notice. A newer notice replaces the older one and
/// each dismisses itself after `ttl`.
#[derive(Clone, Debug)]
pub struct Notices {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for Notices {
    fn default() -> Self { Self::new(Duration::seconds(3)) }
}

impl Notices {
    pub fn new(ttl: Duration) -> Self { Self { current: None, ttl } }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(level, message, Utc::now());
    }

    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) {
        self.current = Some(Notice { level, message: message.into(), shown_at: now });
    }

    pub fn current(&self) -> Option<&Notice> { self.current_at(Utc::now()) }

    pub fn current_at(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.current.as_ref().filter(|n| now - n.shown_at < self.ttl)
    }

    /// Latest notice regardless of expiry.
    pub fn last(&self) -> Option<&Notice> { self.current.as_ref() }

    pub fn dismiss(&mut self) { self.current = None; }
}
