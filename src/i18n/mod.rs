// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Localizes the labels the toast renderer and the demo print, using the
//! Fluent localization system with translation files embedded at build time.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Runtime language switching
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
