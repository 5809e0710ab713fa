// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, the `NewNotification`
//! payload callers hand to the queue, and the `Kind` enum.

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Fallback time-to-live when neither the payload nor the queue specifies one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS);

/// Unique identifier for a notification.
///
/// Ids come from a process-wide monotonic counter and are never reused, so a
/// stale id can never match a later notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw value, e.g. one parsed back from a rendered toast.
    ///
    /// Ids built this way are only meaningful for lookups.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification kind. Purely presentational: selects icon, color and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Success, Kind::Error, Kind::Info, Kind::Warning];

    /// Returns the i18n key of the kind's label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Kind::Success => "notification-kind-success",
            Kind::Error => "notification-kind-error",
            Kind::Info => "notification-kind-info",
            Kind::Warning => "notification-kind-warning",
        }
    }
}

/// A notification payload without an identifier.
///
/// ```
/// use std::time::Duration;
/// use toastline::notifications::{Kind, NewNotification};
///
/// let payload = NewNotification::error("Login Failed")
///     .with_description("Please check your credentials")
///     .with_duration(Duration::from_secs(5));
/// assert_eq!(payload.kind, Kind::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub description: Option<String>,
    pub kind: Kind,
    /// Time-to-live; `None` (or zero) means the queue's default.
    pub duration: Option<Duration>,
}

impl NewNotification {
    pub fn new(kind: Kind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            duration: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Kind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Kind::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Kind::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Kind::Warning, title)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Resolves the effective time-to-live against the queue default.
    ///
    /// A zero duration counts as unspecified.
    #[must_use]
    pub fn effective_duration(&self, default: Duration) -> Duration {
        match self.duration {
            Some(duration) if !duration.is_zero() => duration,
            _ => default,
        }
    }
}

/// A notification in the active collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    title: String,
    description: Option<String>,
    kind: Kind,
    duration: Duration,
    created_at: Instant,
}

impl Notification {
    /// Populates a payload with a fresh id, its effective duration and the
    /// creation instant `now`.
    pub fn from_payload(payload: NewNotification, default: Duration, now: Instant) -> Self {
        let duration = payload.effective_duration(default);
        Self {
            id: NotificationId::new(),
            title: payload.title,
            description: payload.description,
            kind: payload.kind,
            duration,
            created_at: now,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Instant at which the notification auto-dismisses.
    ///
    /// `None` when the deadline lies beyond what the clock can represent; such
    /// a notification only leaves by explicit removal.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        self.created_at.checked_add(self.duration)
    }

    /// Whether the notification is due for removal at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }
}
