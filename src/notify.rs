//! User-facing notifications.
//!
//! The intake pipeline reports through the [`Notifier`] trait and never owns
//! a notification's lifecycle. Two implementations ship:
//!
//! - [`NotificationCenter`]: in-memory toast stack. Toasts auto-dismiss
//!   after a fixed interval (5 seconds by default) or on explicit dismissal.
//! - [`LogNotifier`]: forwards every message to `tracing`, for the CLI.
//!
//! [`Fanout`] sends each notification to several sinks.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Default lifetime of a toast.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// Icon shown next to the toast text.
    pub fn icon(self) -> &'static str {
        match self {
            Level::Success => "fa-check-circle",
            Level::Error => "fa-exclamation-circle",
            Level::Info => "fa-info-circle",
            Level::Warning => "fa-exclamation-triangle",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: Level);
}

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: Level,
    pub shown_at: Instant,
}

impl Toast {
    pub fn icon(&self) -> &'static str {
        self.level.icon()
    }
}

#[derive(Debug, Default)]
struct ToastStack {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// In-memory toast stack with auto-dismiss.
///
/// Time is passed in explicitly ([`expire`](Self::expire)) so the host loop
/// decides when to sweep and tests control the clock.
#[derive(Debug)]
pub struct NotificationCenter {
    dismiss_after: Duration,
    stack: Mutex<ToastStack>,
}

impl NotificationCenter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            stack: Mutex::new(ToastStack::default()),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Show a toast stamped with `now`, returning its id.
    pub fn push_at(&self, message: &str, level: Level, now: Instant) -> u64 {
        let mut stack = self.lock();
        stack.next_id += 1;
        let id = stack.next_id;
        stack.toasts.push(Toast {
            id,
            message: message.to_string(),
            level,
            shown_at: now,
        });
        id
    }

    /// Close one toast. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut stack = self.lock();
        let before = stack.toasts.len();
        stack.toasts.retain(|t| t.id != id);
        stack.toasts.len() != before
    }

    /// Drop every toast that has been visible for the full interval.
    /// Returns how many were removed.
    pub fn expire(&self, now: Instant) -> usize {
        let dismiss_after = self.dismiss_after;
        let mut stack = self.lock();
        let before = stack.toasts.len();
        stack
            .toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < dismiss_after);
        before - stack.toasts.len()
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    /// The newest toast, if any.
    pub fn latest(&self) -> Option<Toast> {
        self.lock().toasts.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ToastStack> {
        // Every mutation is a single push or retain, so a poisoned stack is still valid.
        self.stack.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, message: &str, level: Level) {
        self.push_at(message, level, Instant::now());
    }
}

/// Writes notifications to the log instead of the screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, level: Level) {
        match level {
            Level::Error => tracing::error!(kind = level.as_str(), "{message}"),
            Level::Warning => tracing::warn!(kind = level.as_str(), "{message}"),
            Level::Info | Level::Success => tracing::info!(kind = level.as_str(), "{message}"),
        }
    }
}

/// Delivers each notification to every sink, in order.
#[derive(Clone, Default)]
pub struct Fanout {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl Fanout {
    pub fn new(sinks: Vec<Arc<dyn Notifier>>) -> Self {
        Self { sinks }
    }
}

impl Notifier for Fanout {
    fn notify(&self, message: &str, level: Level) {
        for sink in &self.sinks {
            sink.notify(message, level);
        }
    }
}
