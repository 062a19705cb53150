//! Transient user notifications.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "✔ {}", self.message),
            NoticeLevel::Error => write!(f, "✘ {}", self.message),
        }
    }
}

/// Pending notifications, oldest first. The front-end drains them after
/// each action.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        self.queue.push_back(Notice { level, message });
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
