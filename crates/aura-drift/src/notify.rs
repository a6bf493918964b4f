//! Notification sinks.
//!
//! Remediation actions report progress to the user through a [`Notifier`].
//! Delivery is fire-and-forget: a sink cannot fail an action.
//!
//! Two sinks ship with the crate:
//!
//! - [`TracingNotifier`] -- forwards every notification to `tracing`
//! - [`NotificationLog`] -- keeps the most recent notifications in memory
//!   for a front end to drain and render as toasts

use std::sync::{Arc, Mutex, PoisonError};

use aura_types::{Notification, NotificationKind};
use tracing::{error, info, warn};

/// A fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: Notification);

    /// Deliver a message with the sink's default display duration.
    fn send(&self, kind: NotificationKind, message: String) {
        self.notify(Notification::new(kind, message));
    }

    /// Deliver a message with an explicit display duration.
    fn send_for(&self, kind: NotificationKind, message: String, duration_ms: u64) {
        self.notify(Notification::new(kind, message).with_duration_ms(duration_ms));
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

// ---------------------------------------------------------------------------
// Tracing sink
// ---------------------------------------------------------------------------

/// Forwards notifications to `tracing` at a level matching their kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            id,
            message,
            kind,
            duration_ms,
            ..
        } = notification;
        match kind {
            NotificationKind::Info | NotificationKind::Success => {
                info!(%id, ?kind, ?duration_ms, "{message}");
            }
            NotificationKind::Warning => warn!(%id, ?duration_ms, "{message}"),
            NotificationKind::Error => error!(%id, ?duration_ms, "{message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory sink
// ---------------------------------------------------------------------------

/// Maximum notifications kept in memory.
pub const MAX_NOTIFICATIONS: usize = 200;

/// In-memory notification log, oldest first.
///
/// Once [`MAX_NOTIFICATIONS`] is reached the oldest entry is dropped.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every retained notification, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Messages of every retained notification, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    /// Retained notifications of one kind, oldest first.
    pub fn by_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.lock()
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }

    /// Remove and return every retained notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of retained notifications.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        let mut entries = self.lock();
        entries.push(notification);
        if entries.len() > MAX_NOTIFICATIONS {
            let excess = entries.len().saturating_sub(MAX_NOTIFICATIONS);
            entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_insertion_order() {
        let log = NotificationLog::new();
        log.send(NotificationKind::Info, "first".to_owned());
        log.send_for(NotificationKind::Success, "second".to_owned(), 2000);

        assert_eq!(log.messages(), vec!["first", "second"]);
        assert_eq!(
            log.snapshot().last().and_then(|n| n.duration_ms),
            Some(2000)
        );
    }

    #[test]
    fn log_caps_at_max() {
        let log = NotificationLog::new();
        for i in 0..250 {
            log.send(NotificationKind::Info, format!("message {i}"));
        }
        assert_eq!(log.len(), MAX_NOTIFICATIONS);
        assert_eq!(
            log.messages().first().map(String::as_str),
            Some("message 50")
        );
    }

    #[test]
    fn filter_by_kind_and_drain() {
        let log = NotificationLog::new();
        log.send(NotificationKind::Info, "progress".to_owned());
        log.send(NotificationKind::Error, "rejected".to_owned());

        assert_eq!(log.by_kind(NotificationKind::Error).len(), 1);
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn shared_log_through_arc() {
        let log = Arc::new(NotificationLog::new());
        let sink: Arc<dyn Notifier> = Arc::clone(&log) as Arc<dyn Notifier>;
        sink.send(NotificationKind::Warning, "check".to_owned());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn tracing_sink_accepts_every_kind() {
        let sink = TracingNotifier;
        for kind in [
            NotificationKind::Info,
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
        ] {
            sink.send(kind, "message".to_owned());
        }
    }
}
