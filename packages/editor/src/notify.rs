//! # Notification Sink
//!
//! Fire-and-forget channel for surfacing save outcomes to the user.
//! Presentation (toast, status bar, display duration) belongs to the host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Sink that routes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!("{message}"),
            NotificationKind::Failure => tracing::error!("{message}"),
        }
    }
}
