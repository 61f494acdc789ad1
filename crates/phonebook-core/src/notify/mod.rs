//! Single-slot, time-limited user-feedback channel
//!
//! The notifier holds at most one message at a time. `notify` replaces the
//! slot immediately and schedules a clear after a fixed delay. Each call
//! owns its own timer: a later `notify` bumps a generation counter, so a
//! superseded timer finds a stale generation when it fires and clears
//! nothing. There is no queueing of pending messages.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::config::NotifyConfig;

/// Default time a message stays visible
const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation took effect as requested
    Success,
    /// Operation failed or was repaired
    Error,
}

/// A user-facing feedback message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Single-slot notification channel
///
/// Cloning the notifier clones the handle; all clones share the slot.
/// Consumers observe the slot through [`Notifier::current`],
/// [`Notifier::subscribe`] or [`Notifier::stream`].
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: watch::Sender<Option<Notification>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl Notifier {
    /// Create a notifier with the default 5 second ttl
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a notifier with an explicit ttl
    pub fn with_ttl(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot,
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Create a notifier from configuration
    pub fn from_config(config: &NotifyConfig) -> Result<Self, crate::Error> {
        config.validate()?;
        Ok(Self::with_ttl(Duration::from_millis(config.ttl_ms)))
    }

    /// Publish a message, replacing any current one
    ///
    /// The message stays visible for the configured ttl unless a later
    /// `notify` replaces it first. Must be called from within a tokio
    /// runtime (the clear task is spawned).
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.slot.send_replace(Some(Notification {
            message: message.into(),
            severity,
        }));

        let slot = self.slot.clone();
        let counter = Arc::clone(&self.generation);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // Only the timer belonging to the visible message may clear.
            if counter.load(Ordering::SeqCst) == generation {
                slot.send_replace(None);
            }
        });
    }

    /// Publish a success message
    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    /// Publish an error message
    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// The currently visible message, if any
    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    /// Subscribe to slot changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }

    /// Slot changes as an async stream
    pub fn stream(&self) -> WatchStream<Option<Notification>> {
        WatchStream::new(self.slot.subscribe())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_replaces_current_message_immediately() {
        let notifier = Notifier::new();

        notifier.success("Added Arto Hellas");
        notifier.error("name must be unique");

        let current = notifier.current().unwrap();
        assert_eq!(current.message, "name must be unique");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn from_config_rejects_zero_ttl() {
        assert!(Notifier::from_config(&NotifyConfig { ttl_ms: 0 }).is_err());
        let notifier = Notifier::from_config(&NotifyConfig::default()).unwrap();
        assert_eq!(notifier.ttl, DEFAULT_TTL);
    }

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_ttl() {
        let notifier = Notifier::new();
        notifier.success("Added Arto Hellas");

        tokio::time::advance(Duration::from_millis(4999)).await;
        tokio::task::yield_now().await;
        assert!(notifier.current().is_some());

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(notifier.current().is_none());
    }
}
