//! Transient user notifications (toasts).

use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Where pages send their notifications.
pub trait NotificationSink {
    fn notify(&mut self, toast: Toast);

    fn success(&mut self, message: &str) {
        self.notify(Toast::new(ToastLevel::Success, message));
    }

    fn warning(&mut self, message: &str) {
        self.notify(Toast::new(ToastLevel::Warning, message));
    }

    fn error(&mut self, message: &str) {
        self.notify(Toast::new(ToastLevel::Error, message));
    }
}

/// Collects toasts in order. Handy for headless use.
impl NotificationSink for Vec<Toast> {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}

/// The toast currently displayed by the terminal UI.
#[derive(Debug, Default)]
pub struct ToastState {
    current: Option<(Toast, Instant)>,
}

impl ToastState {
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }

    /// Drops the toast once it has been visible for [`TOAST_TTL`].
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.current {
            if now.duration_since(*shown_at) >= TOAST_TTL {
                self.current = None;
            }
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl NotificationSink for ToastState {
    fn notify(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!("toast: {}", toast.message),
            _ => tracing::debug!("toast: {}", toast.message),
        }
        self.current = Some((toast, Instant::now()));
    }
}
