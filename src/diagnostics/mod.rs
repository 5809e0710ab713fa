// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Captures notification lifecycle events (shown, dismissed, expired) and
//! queue state changes, stores them in a memory-bounded circular buffer, and
//! exports them as JSON.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cloneable, non-blocking event sender
//! - [`DiagnosticsCollector`]: drains the channel into a [`CircularBuffer`]
//! - [`DiagnosticEvent`]: timestamped event

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppStateEvent, DiagnosticEvent, DiagnosticEventKind, DismissReason, ErrorEvent, WarningEvent,
};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
