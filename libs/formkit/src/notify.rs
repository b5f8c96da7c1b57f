use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Severity/styling hint attached to a notification. Styling only; carries
/// no functional meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Red,
    Orange,
    Green,
    Blue,
}

/// A non-blocking, user-visible message. Unlike a
/// [`crate::FormError::Validation`], showing one of these never aborts the
/// pending operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub indicator: Indicator,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        indicator: Indicator,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            indicator,
        }
    }
}

/// Host port for displaying non-blocking notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default adapter: routes notifications into the tracing pipeline.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.indicator {
            Indicator::Red | Indicator::Orange => {
                tracing::warn!(title = %n.title, indicator = ?n.indicator, "{}", n.message)
            }
            Indicator::Green | Indicator::Blue => {
                tracing::info!(title = %n.title, indicator = ?n.indicator, "{}", n.message)
            }
        }
    }
}

/// Capturing adapter for tests and harnesses: records every notification.
#[derive(Default)]
pub struct CapturingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut self.seen.lock())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

impl Notifier for CapturingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}
