// SPDX-License-Identifier: MPL-2.0
//! Notification queue with timed auto-dismissal.
//!
//! [`ToastQueue`] wraps a [`Manager`] behind a mutex and schedules one Tokio
//! timer per notification. Timers hold only a weak reference to the queue
//! state, are aborted on manual removal, and re-check presence when they
//! fire, so a late timer is always a no-op.
//!
//! ```no_run
//! use toastline::notifications::{NewNotification, ToastQueue};
//!
//! # async fn run() -> toastline::error::Result<()> {
//! let queue = ToastQueue::try_current()?;
//! let id = queue.enqueue(NewNotification::success("Profile saved"));
//! assert_eq!(queue.list().len(), 1);
//! queue.remove(id);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::manager::Manager;
use super::notification::{NewNotification, Notification, NotificationId};
use crate::config::NotificationsConfig;
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle, DismissReason};
use crate::error::Result;

#[derive(Debug)]
struct Shared {
    manager: Manager,
    timers: HashMap<NotificationId, AbortHandle>,
    snapshot_tx: watch::Sender<Vec<Notification>>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Shared {
    fn publish(&self) {
        self.snapshot_tx.send_replace(self.manager.snapshot());
    }

    fn cancel_timers(&mut self) -> usize {
        let cancelled = self.timers.len();
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        cancelled
    }

    /// Timer callback: removes `id` if it is still active.
    fn expire(&mut self, id: NotificationId) {
        self.timers.remove(&id);
        if self
            .manager
            .remove_with_reason(id, DismissReason::Expired)
            .is_some()
        {
            self.publish();
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

/// Process-wide notification queue handle.
///
/// Cloning is cheap; every clone refers to the same active collection. The
/// last clone to be dropped cancels all pending timers.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    shared: Arc<Mutex<Shared>>,
    runtime: Handle,
}

impl ToastQueue {
    /// Creates an empty queue whose timers run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self::with_manager(Manager::new(), runtime)
    }

    /// Creates an empty queue on the runtime of the calling task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::error::Error::Runtime) when called
    /// outside a Tokio runtime.
    pub fn try_current() -> Result<Self> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Creates an empty queue using the configured default duration.
    pub fn from_config(config: &NotificationsConfig, runtime: Handle) -> Self {
        Self::with_manager(
            Manager::new().with_default_duration(config.default_duration()),
            runtime,
        )
    }

    fn with_manager(manager: Manager, runtime: Handle) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                manager,
                timers: HashMap::new(),
                snapshot_tx,
                diagnostics: None,
            })),
            runtime,
        }
    }

    /// Attaches a diagnostics handle and records the queue start.
    #[must_use]
    pub fn with_diagnostics(self, handle: DiagnosticsHandle) -> Self {
        self.set_diagnostics(handle);
        self
    }

    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        let mut shared = self.lock();
        handle.log_state(AppStateEvent::QueueStarted {
            default_duration_ms: duration_ms(shared.manager.default_duration()),
        });
        shared.manager.set_diagnostics(handle.clone());
        shared.diagnostics = Some(handle);
    }

    /// Appends a notification and schedules its auto-dismissal.
    ///
    /// Returns the generated id immediately so the caller can dismiss early.
    pub fn enqueue(&self, payload: NewNotification) -> NotificationId {
        let mut shared = self.lock();
        let id = shared.manager.push(payload);
        let duration = shared
            .manager
            .get(id)
            .map_or_else(|| shared.manager.default_duration(), Notification::duration);

        let state: Weak<Mutex<Shared>> = Arc::downgrade(&self.shared);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(state) = state.upgrade() {
                lock(&state).expire(id);
            }
        });
        shared.timers.insert(id, timer.abort_handle());
        shared.publish();
        id
    }

    /// Removes the notification with `id` and cancels its timer.
    ///
    /// Unknown or already-removed ids are ignored.
    pub fn remove(&self, id: NotificationId) {
        let mut shared = self.lock();
        if let Some(timer) = shared.timers.remove(&id) {
            timer.abort();
        }
        if shared.manager.dismiss(id) {
            shared.publish();
        }
    }

    /// Returns the active notifications in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Notification> {
        self.lock().manager.snapshot()
    }

    /// Subscribes to snapshots published after every mutation.
    ///
    /// The receiver starts with the current collection marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.lock().snapshot_tx.subscribe()
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.lock().manager.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().manager.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().manager.is_empty()
    }

    /// Number of auto-dismiss timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.lock().manager.default_duration()
    }

    /// Removes every notification and cancels all timers.
    ///
    /// Returns how many notifications were active.
    pub fn clear(&self) -> usize {
        let mut shared = self.lock();
        shared.cancel_timers();
        let removed = shared.manager.clear();
        if removed > 0 {
            shared.publish();
        }
        removed
    }

    /// Tears the queue down: cancels all pending timers and empties it.
    ///
    /// The queue stays usable afterwards.
    pub fn shutdown(&self) {
        let mut shared = self.lock();
        let cancelled_timers = shared.cancel_timers();
        if shared.manager.clear() > 0 {
            shared.publish();
        }
        if let Some(handle) = &shared.diagnostics {
            handle.log_state(AppStateEvent::QueueShutdown { cancelled_timers });
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        lock(&self.shared)
    }
}

// A panic while holding the lock leaves the collection consistent: every
// mutation is a single push or remove.
fn lock(state: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
