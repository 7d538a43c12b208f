//! Cross-component notification bus.
//!
//! Any collaborator may publish a toast; the presentation layer consumes
//! an ordered snapshot and dismisses entries by ID. Each notification
//! starts an independent expiry timer on admission; the timer is aborted
//! on manual dismissal, and an expiry firing after a manual dismissal is
//! a safe no-op.
//!
//! `publish` must be called within a Tokio runtime context, since expiry
//! timers are spawned tasks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use maygloss_core::NotificationId;
use serde::Serialize;
use tokio::task::AbortHandle;

/// How long a notification stays visible unless dismissed earlier.
pub const DISPLAY_WINDOW: Duration = Duration::from_secs(4);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// A short-lived, user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Opaque unique token for dismissal.
    pub id: NotificationId,
    /// Display text.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
}

struct Entry {
    note: Notification,
    expiry: AbortHandle,
}

/// Process-wide notification bus.
///
/// Cheaply cloneable; all clones share the same queue. Snapshot order is
/// insertion order, with no priority.
#[derive(Clone, Default)]
pub struct NotificationBus {
    inner: Arc<Mutex<Vec<Entry>>>,
}

impl NotificationBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a notification and start its expiry timer.
    ///
    /// Returns the ID, allowing manual dismissal before expiry.
    pub fn publish(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId::generate();
        let message = message.into();

        let bus = self.clone();
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_WINDOW).await;
            bus.dismiss(id);
        })
        .abort_handle();

        tracing::debug!(%id, ?kind, %message, "notification published");
        self.lock().push(Entry {
            note: Notification { id, message, kind },
            expiry,
        });
        id
    }

    /// Remove a notification by ID.
    ///
    /// Safe no-op if the entry is already gone; this covers the race
    /// between the expiry timer and a manual close.
    pub fn dismiss(&self, id: NotificationId) {
        let mut entries = self.lock();
        if let Some(pos) = entries.iter().position(|e| e.note.id == id) {
            let entry = entries.remove(pos);
            entry.expiry.abort();
            tracing::debug!(%id, "notification dismissed");
        }
    }

    /// Current notifications in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().iter().map(|e| e.note.clone()).collect()
    }

    /// Number of live notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the bus has no live notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
