// SPDX-License-Identifier: MPL-2.0
//! Serializable diagnostic report.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiagnosticEventKind;

/// An event with its timestamp expressed relative to collection start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableEvent {
    /// Milliseconds since the collector was created.
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(timestamp: Instant, started_at: Instant, kind: DiagnosticEventKind) -> Self {
        let offset_ms = timestamp.saturating_duration_since(started_at).as_millis() as u64;
        Self { offset_ms, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub version: String,
    pub collection_started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, duration_ms: u64, event_count: usize) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: started_at,
            generated_at: Utc::now(),
            collection_duration_ms: duration_ms,
            event_count,
        }
    }
}

/// Full diagnostics report as exported to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        Self { metadata, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningEvent;
    use std::time::Duration;

    #[test]
    fn offset_is_relative_to_start() {
        let start = Instant::now();
        let event = SerializableEvent::new(
            start + Duration::from_millis(250),
            start,
            DiagnosticEventKind::Warning {
                event: WarningEvent::new("slow"),
            },
        );
        assert_eq!(event.offset_ms, 250);
    }

    #[test]
    fn events_before_start_saturate_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let event = SerializableEvent::new(
            Instant::now(),
            start,
            DiagnosticEventKind::Warning {
                event: WarningEvent::new("early"),
            },
        );
        assert_eq!(event.offset_ms, 0);
    }
}
