// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The collector receives events from the notification queue (and anything
//! else holding a [`DiagnosticsHandle`]) and stores them in a circular buffer.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::{
    AppStateEvent, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, DismissReason, ErrorEvent, ReportMetadata, SerializableEvent, WarningEvent,
};
use crate::error::Result;
use crate::notifications::{Kind, NotificationId};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads, including
/// the timer tasks of the notification queue. Sends never block: when the
/// channel is full the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_notification_shown(&self, id: NotificationId, kind: Kind, duration: Duration) {
        self.send(DiagnosticEventKind::NotificationShown {
            id,
            kind,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        });
    }

    pub fn log_notification_dismissed(&self, id: NotificationId, reason: DismissReason) {
        self.send(DiagnosticEventKind::NotificationDismissed { id, reason });
    }

    pub fn log_warning(&self, event: WarningEvent) {
        self.send(DiagnosticEventKind::Warning { event });
    }

    pub fn log_error(&self, event: ErrorEvent) {
        self.send(DiagnosticEventKind::Error { event });
    }

    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(
        &self,
        kind: DiagnosticEventKind,
    ) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
///
/// Old events are evicted when the buffer reaches capacity.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for relative event offsets.
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_channel_capacity(capacity, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a collector whose channel holds at most `channel_capacity`
    /// unprocessed events.
    #[must_use]
    pub fn with_channel_capacity(capacity: BufferCapacity, channel_capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(channel_capacity);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically, and always before exporting.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> Result<String> {
        let report = self.build_report();
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Writes the JSON report to `path`, creating parent directories.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, events)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_warning(WarningEvent::new("first"));
        handle.log_error(ErrorEvent::new("second"));
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds[0],
            DiagnosticEventKind::Warning {
                event: WarningEvent::new("first")
            }
        );
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let mut collector =
            DiagnosticsCollector::with_channel_capacity(BufferCapacity::default(), 2);
        let handle = collector.handle();

        for i in 0..5 {
            handle.log_warning(WarningEvent::new(format!("w{i}")));
        }
        assert!(matches!(
            handle.try_log(DiagnosticEventKind::Warning {
                event: WarningEvent::new("overflow")
            }),
            Err(TrySendError::Full(_))
        ));

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn buffer_evicts_oldest_beyond_capacity() {
        let mut collector = DiagnosticsCollector::with_channel_capacity(
            BufferCapacity::new(0),
            1_000,
        );
        let handle = collector.handle();
        let capacity = collector.capacity();

        for i in 0..capacity + 10 {
            handle.log_notification_dismissed(
                NotificationId::from_raw(i as u64),
                DismissReason::Manual,
            );
        }
        collector.process_pending();

        assert_eq!(collector.len(), capacity);
        let first = collector.iter().next().map(|e| e.kind.clone());
        assert_eq!(
            first,
            Some(DiagnosticEventKind::NotificationDismissed {
                id: NotificationId::from_raw(10),
                reason: DismissReason::Manual,
            })
        );
    }

    #[test]
    fn export_json_contains_metadata_and_events() {
        let mut collector = DiagnosticsCollector::default();
        collector
            .handle()
            .log_notification_shown(
                NotificationId::from_raw(3),
                Kind::Success,
                Duration::from_millis(3000),
            );
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        let report: DiagnosticReport =
            serde_json::from_str(&json).expect("report should deserialize");

        assert_eq!(report.metadata.event_count, 1);
        assert_eq!(
            report.events[0].kind,
            DiagnosticEventKind::NotificationShown {
                id: NotificationId::from_raw(3),
                kind: Kind::Success,
                duration_ms: 3000,
            }
        );
    }

    #[test]
    fn export_to_file_creates_parent_directories() {
        let collector = DiagnosticsCollector::default();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reports").join("diagnostics.json");

        collector.export_to_file(&path).expect("export should succeed");
        assert!(path.exists());
    }
}
