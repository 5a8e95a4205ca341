//! Process-wide user-facing notifications.
//!
//! Services report transient alerts here instead of owning any presentation
//! state. The default sink is a channel; whatever renders the alerts (a
//! snackbar, a log tail) drains the receiver at its own pace.

use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Default sink backed by an unbounded channel. Sending never blocks; if the
/// receiver is gone the notification is dropped, not a panic.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, message: &str, severity: Severity) {
        let _ = self.tx.send(Notification {
            message: message.to_string(),
            severity,
        });
    }
}
