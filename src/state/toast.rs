// Transient notifications.
// Toasts expire after a fixed time and can be dismissed early.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// A notification shown over the page.
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: Option<String>,
    pub message: String,
    created_at: Instant,
}

/// Queue of visible toasts, newest last.
#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl Toasts {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(6);
    const MAX_VISIBLE: usize = 3;

    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, None, message.into());
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Error, Some(title.into()), message.into());
    }

    fn push(&mut self, level: ToastLevel, title: Option<String>, message: String) {
        self.items.push_back(Toast {
            level,
            title,
            message,
            created_at: Instant::now(),
        });
        while self.items.len() > Self::MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    /// Dismiss the newest toast.
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop_back().is_some()
    }

    /// Drop expired toasts.
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.items.retain(|t| t.created_at.elapsed() < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
