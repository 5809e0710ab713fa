// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the ordered active collection. It has no timers of its
//! own: expiry is driven either by [`Manager::tick`] (polling) or by the
//! [`ToastQueue`](super::ToastQueue), which schedules one timer per
//! notification and calls back into the manager.

use super::notification::{NewNotification, Notification, NotificationId, DEFAULT_DURATION};
use super::Kind;
use crate::diagnostics::{DiagnosticsHandle, DismissReason, ErrorEvent, WarningEvent};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Manages the active notifications (oldest first).
#[derive(Debug)]
pub struct Manager {
    active: VecDeque<Notification>,
    default_duration: Duration,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for Manager {
    fn default() -> Self {
        Self {
            active: VecDeque::new(),
            default_duration: DEFAULT_DURATION,
            diagnostics: None,
        }
    }
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duration applied to payloads that carry none.
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        if !duration.is_zero() {
            self.default_duration = duration;
        }
        self
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Sets the diagnostics handle for lifecycle events.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Appends a new notification created now and returns its id.
    pub fn push(&mut self, payload: NewNotification) -> NotificationId {
        self.push_at(payload, Instant::now())
    }

    /// Appends a new notification created at `now`.
    pub fn push_at(&mut self, payload: NewNotification, now: Instant) -> NotificationId {
        let notification = Notification::from_payload(payload, self.default_duration, now);
        let id = notification.id();
        self.insert(notification);
        id
    }

    /// Appends a populated notification to the end of the collection.
    ///
    /// An id that is already active is rejected so each notification appears
    /// once. Warnings and errors are also logged as diagnostic events.
    fn insert(&mut self, notification: Notification) -> Option<NotificationId> {
        let id = notification.id();
        if self.contains(id) {
            return None;
        }
        if let Some(handle) = &self.diagnostics {
            handle.log_notification_shown(id, notification.kind(), notification.duration());
            match notification.kind() {
                Kind::Warning => handle.log_warning(WarningEvent::new(notification.title())),
                Kind::Error => handle.log_error(ErrorEvent::new(notification.title())),
                Kind::Success | Kind::Info => {}
            }
        }
        self.active.push_back(notification);
        Some(id)
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed. Unknown or
    /// already-removed ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.remove_with_reason(id, DismissReason::Manual).is_some()
    }

    /// Removes a notification and records why it left.
    pub(crate) fn remove_with_reason(
        &mut self,
        id: NotificationId,
        reason: DismissReason,
    ) -> Option<Notification> {
        let pos = self.active.iter().position(|n| n.id() == id)?;
        let removed = self.active.remove(pos);
        if removed.is_some() {
            if let Some(handle) = &self.diagnostics {
                handle.log_notification_dismissed(id, reason);
            }
        }
        removed
    }

    /// Removes every notification whose deadline is at or before `now`.
    ///
    /// Survivors keep their relative order. Returns the removed ids in
    /// collection order.
    pub fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired: Vec<NotificationId> = self
            .active
            .iter()
            .filter(|n| n.is_expired_at(now))
            .map(Notification::id)
            .collect();

        for id in &expired {
            self.remove_with_reason(*id, DismissReason::Expired);
        }
        expired
    }

    /// Expires everything that is due right now.
    ///
    /// Should be called periodically (e.g., every 100-500ms) when the manager
    /// is used without a [`ToastQueue`](super::ToastQueue).
    pub fn tick(&mut self) -> Vec<NotificationId> {
        self.expire_due(Instant::now())
    }

    /// Earliest pending auto-dismiss deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().filter_map(Notification::expires_at).min()
    }

    /// Returns the active notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    /// Returns an owned copy of the active collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.active.iter().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.active.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Removes all notifications and returns how many were active.
    pub fn clear(&mut self) -> usize {
        let removed = self.active.len();
        for notification in self.active.drain(..) {
            if let Some(handle) = &self.diagnostics {
                handle.log_notification_dismissed(notification.id(), DismissReason::Cleared);
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};

    fn titles(manager: &Manager) -> Vec<&str> {
        manager.visible().map(Notification::title).collect()
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.default_duration(), Duration::from_millis(3000));
        assert!(manager.next_deadline().is_none());
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut manager = Manager::new();
        let a = manager.push(NewNotification::success("a"));
        let b = manager.push(NewNotification::error("b"));
        let c = manager.push(NewNotification::info("c"));

        assert_eq!(titles(&manager), vec!["a", "b", "c"]);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn dismiss_removes_only_matching_entry() {
        let mut manager = Manager::new();
        manager.push(NewNotification::success("a"));
        let b = manager.push(NewNotification::success("b"));
        manager.push(NewNotification::success("c"));

        assert!(manager.dismiss(b));
        assert_eq!(titles(&manager), vec!["a", "c"]);
    }

    #[test]
    fn dismiss_twice_is_inert() {
        let mut manager = Manager::new();
        let a = manager.push(NewNotification::success("a"));
        manager.push(NewNotification::success("b"));

        assert!(manager.dismiss(a));
        assert!(!manager.dismiss(a));
        assert_eq!(titles(&manager), vec!["b"]);
    }

    #[test]
    fn dismiss_unknown_id_returns_false() {
        let mut manager = Manager::new();
        manager.push(NewNotification::success("a"));
        assert!(!manager.dismiss(NotificationId::from_raw(u64::MAX)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn expire_due_removes_short_lived_first_and_keeps_order() {
        let mut manager = Manager::new();
        let start = Instant::now();
        manager.push_at(
            NewNotification::success("long").with_duration(Duration::from_millis(3000)),
            start,
        );
        let short = manager.push_at(
            NewNotification::error("short").with_duration(Duration::from_millis(100)),
            start,
        );
        manager.push_at(NewNotification::info("default"), start);

        assert!(manager.expire_due(start).is_empty());
        assert_eq!(
            manager.expire_due(start + Duration::from_millis(150)),
            vec![short]
        );
        assert_eq!(titles(&manager), vec!["long", "default"]);

        let expired = manager.expire_due(start + Duration::from_millis(3050));
        assert_eq!(expired.len(), 2);
        assert!(manager.is_empty());
    }

    #[test]
    fn next_deadline_is_earliest_expiry() {
        let mut manager = Manager::new();
        let start = Instant::now();
        manager.push_at(NewNotification::info("a"), start);
        manager.push_at(
            NewNotification::info("b").with_duration(Duration::from_millis(500)),
            start,
        );

        assert_eq!(
            manager.next_deadline(),
            Some(start + Duration::from_millis(500))
        );
    }

    #[test]
    fn custom_default_duration_applies_to_payloads_without_one() {
        let mut manager = Manager::new().with_default_duration(Duration::from_secs(10));
        let start = Instant::now();
        let id = manager.push_at(NewNotification::info("a"), start);

        assert_eq!(
            manager.get(id).map(Notification::duration),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn zero_default_duration_is_ignored() {
        let manager = Manager::new().with_default_duration(Duration::ZERO);
        assert_eq!(manager.default_duration(), DEFAULT_DURATION);
    }

    #[test]
    fn reinserting_an_active_notification_is_rejected() {
        let mut manager = Manager::new();
        let id = manager.push(NewNotification::info("a"));
        let copy = manager.snapshot()[0].clone();

        assert_eq!(manager.insert(copy), None);
        assert_eq!(manager.visible().filter(|n| n.id() == id).count(), 1);

        assert!(manager.dismiss(id));
        assert!(!manager.contains(id));
    }

    #[test]
    fn tick_keeps_fresh_notifications() {
        let mut manager = Manager::new();
        manager.push(NewNotification::success("fresh"));

        assert!(manager.tick().is_empty());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn huge_duration_never_expires_and_has_no_deadline() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let forever = manager.push_at(
            NewNotification::info("forever").with_duration(Duration::MAX),
            start,
        );

        assert!(manager.tick().is_empty());
        assert!(manager.expire_due(start + Duration::from_secs(86_400)).is_empty());
        assert!(manager.next_deadline().is_none());

        manager.push_at(
            NewNotification::info("short").with_duration(Duration::from_millis(100)),
            start,
        );
        assert_eq!(
            manager.next_deadline(),
            Some(start + Duration::from_millis(100))
        );
        assert!(manager.contains(forever));
    }

    #[test]
    fn clear_removes_all() {
        let mut manager = Manager::new();
        for i in 0..5 {
            manager.push(NewNotification::success(format!("test-{i}")));
        }

        assert_eq!(manager.clear(), 5);
        assert!(manager.is_empty());
    }

    #[test]
    fn lifecycle_is_reported_to_diagnostics() {
        let mut collector = DiagnosticsCollector::default();
        let mut manager = Manager::new();
        manager.set_diagnostics(collector.handle());

        let id = manager.push(NewNotification::error("Login Failed"));
        manager.dismiss(id);
        manager.dismiss(id);
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(
            kinds[0],
            DiagnosticEventKind::NotificationShown { kind: Kind::Error, .. }
        ));
        assert!(matches!(kinds[1], DiagnosticEventKind::Error { .. }));
        assert_eq!(
            kinds[2],
            DiagnosticEventKind::NotificationDismissed {
                id,
                reason: DismissReason::Manual
            }
        );
    }
}
