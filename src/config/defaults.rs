// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Notifications**: Auto-dismiss duration bounds
//! - **Diagnostics**: Event buffer sizing

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default auto-dismiss duration for a notification (in milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3000;

/// Minimum configurable default duration (in milliseconds).
pub const MIN_NOTIFICATION_DURATION_MS: u64 = 100;

/// Maximum configurable default duration (in milliseconds).
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
