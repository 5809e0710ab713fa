// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to report the outcome of an action
//! (form submitted, login failed, upload started) and disappear on their own
//! after a per-notification duration, or earlier when dismissed.
//!
//! # Components
//!
//! - [`notification`] - `Notification`, its `NewNotification` payload and `Kind`
//! - [`manager`] - `Manager`, the ordered active collection
//! - [`queue`] - `ToastQueue`, the manager plus auto-dismiss timers
//! - [`toast`] - terminal rendering of notifications
//!
//! # Usage
//!
//! ```ignore
//! use toastline::notifications::{NewNotification, ToastQueue};
//!
//! let queue = ToastQueue::try_current()?;
//! let id = queue.enqueue(NewNotification::error("Login Failed"));
//!
//! // Close button
//! queue.remove(id);
//! ```
//!
//! # Design Considerations
//!
//! - Default duration: 3s, overridable per notification and via config
//! - Order: oldest first; expiry only deletes, never reorders
//! - Ids are never reused, so stale ids and late timers are harmless

mod manager;
mod notification;
mod queue;
mod toast;

pub use manager::Manager;
pub use notification::{Kind, NewNotification, Notification, NotificationId, DEFAULT_DURATION};
pub use queue::ToastQueue;
pub use toast::{ColorMode, Toast};
