// SPDX-License-Identifier: MPL-2.0
//! `toastline` is an ephemeral notification (toast) queue.
//!
//! Notifications are appended in order, dismissed automatically after a
//! per-notification duration driven by Tokio timers, or removed early by id.
//! The crate also ships a localized terminal renderer, a diagnostics event
//! log and a demo binary replaying a front-end's toast traffic.

#![doc(html_root_url = "https://docs.rs/toastline/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod notifications;
pub mod paths;
