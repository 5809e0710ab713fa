// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events describe the lifecycle of notifications and of the queue itself.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{Kind, NotificationId};

/// Why a notification left the active collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Explicit removal by the caller (e.g., a close button).
    Manual,
    /// Its auto-dismiss duration elapsed.
    Expired,
    /// The queue was cleared or shut down.
    Cleared,
}

/// Queue-level state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    QueueStarted {
        default_duration_ms: u64,
    },
    QueueShutdown {
        /// Timers that were still pending and got cancelled.
        cancelled_timers: usize,
    },
}

/// A warning surfaced to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An error surfaced to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    NotificationShown {
        id: NotificationId,
        kind: Kind,
        duration_ms: u64,
    },
    NotificationDismissed {
        id: NotificationId,
        reason: DismissReason,
    },
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
    AppState {
        state: AppStateEvent,
    },
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissed_event_serializes_with_tag() {
        let kind = DiagnosticEventKind::NotificationDismissed {
            id: NotificationId::from_raw(7),
            reason: DismissReason::Expired,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");

        assert!(json.contains(r#""type":"notification_dismissed""#));
        assert!(json.contains(r#""reason":"expired""#));
        assert!(json.contains(r#""id":7"#));
    }

    #[test]
    fn shown_event_serializes_kind_in_snake_case() {
        let kind = DiagnosticEventKind::NotificationShown {
            id: NotificationId::from_raw(1),
            kind: Kind::Warning,
            duration_ms: 3000,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert!(json.contains(r#""kind":"warning""#));
    }

    #[test]
    fn state_event_deserializes() {
        let json = r#"{"type":"app_state","state":{"state":"queue_shutdown","cancelled_timers":2}}"#;
        let kind: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");
        assert_eq!(
            kind,
            DiagnosticEventKind::AppState {
                state: AppStateEvent::QueueShutdown {
                    cancelled_timers: 2
                }
            }
        );
    }
}
