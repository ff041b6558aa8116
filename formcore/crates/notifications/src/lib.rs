//! Single-slot observable notification channel.
//!
//! A [`MessageChannel`] holds at most one live [`Notification`]. Writers
//! overwrite the slot and every subscriber observes the write synchronously;
//! there is no queue and no history, so late subscribers only ever see the
//! latest value. This is a plain value holder with callbacks, deliberately
//! free of any framework-specific reactive primitive.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification, driving its visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A completed operation worth celebrating.
    Success,
    /// Neutral informational message.
    Info,
    /// A failure the user should react to.
    Error,
}

/// One transient user-facing message.
///
/// Notifications are immutable payloads; replacing the live notification is
/// the channel's job, not the notification's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    /// Build a notification with an explicit severity.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Build a [`Severity::Success`] notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    /// Build a [`Severity::Info`] notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Build a [`Severity::Error`] notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Severity of the message.
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

type Handler = Arc<dyn Fn(Option<&Notification>) + Send + Sync + 'static>;

#[derive(Default)]
struct ChannelState {
    current: Option<Notification>,
    subscribers: Vec<(u64, Handler)>,
    next_id: u64,
}

/// Shared handle to the single notification slot.
///
/// Handles are cheap to clone; every clone observes and mutates the same
/// slot, so one producer and any number of consumers stay consistent.
#[derive(Clone, Default)]
pub struct MessageChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl MessageChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot and notify every subscriber with the new value.
    pub fn publish(&self, notification: Notification) {
        let handlers = {
            let mut state = self.lock();
            state.current = Some(notification.clone());
            state.snapshot_handlers()
        };
        for handler in handlers {
            handler(Some(&notification));
        }
    }

    /// Empty the slot and notify every subscriber of the absence.
    pub fn clear(&self) {
        let handlers = {
            let mut state = self.lock();
            state.current = None;
            state.snapshot_handlers()
        };
        for handler in handlers {
            handler(None);
        }
    }

    /// Read the live notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    /// Register `handler`, invoke it immediately with the current value, and
    /// return a guard that detaches it when cancelled or dropped.
    pub fn subscribe(
        &self,
        handler: impl Fn(Option<&Notification>) + Send + Sync + 'static,
    ) -> Subscription {
        let handler: Handler = Arc::new(handler);
        let (id, current) = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push((id, Arc::clone(&handler)));
            (id, state.current.clone())
        };
        handler(current.as_ref());
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    // A poisoned slot only means a handler panicked mid-notify; the value
    // itself is still coherent, so recover the guard instead of propagating.
    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("MessageChannel")
            .field("current", &state.current)
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl ChannelState {
    // Handlers are cloned out so they run without the slot lock held; a
    // handler may therefore publish or clear re-entrantly.
    fn snapshot_handlers(&self) -> Vec<Handler> {
        self.subscribers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }
}

/// Guard for one registered subscriber.
///
/// Dropping the guard detaches the handler; [`Subscription::cancel`] makes
/// the detach explicit at call sites.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<ChannelState>>,
}

impl Subscription {
    /// Detach the handler so it receives no further values.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}
