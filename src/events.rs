//! Events flowing from screens to the shell: toasts and redirects.

use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.level {
            ToastLevel::Success => "✅",
            ToastLevel::Info => "ℹ️",
            ToastLevel::Error => "❌",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Toast(Toast),
    Redirect(Route),
}

/// Sending half of the UI event channel. Events sent after the receiver is
/// gone are dropped.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<UiEvent>,
}

pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<UiEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

impl EventSender {
    pub fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            debug!("UI event receiver closed, event dropped");
        }
    }

    pub fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        self.emit(UiEvent::Toast(Toast {
            level,
            message: message.into(),
        }));
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.toast(ToastLevel::Success, message);
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.toast(ToastLevel::Error, message);
    }

    pub fn redirect(&self, route: Route) {
        self.emit(UiEvent::Redirect(route));
    }
}

/// Drains every event currently queued without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
