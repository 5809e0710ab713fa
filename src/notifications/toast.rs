// SPDX-License-Identifier: MPL-2.0
//! Terminal rendering of notifications.
//!
//! Toasts are the visual representation of notifications: small cards with a
//! kind-colored accent bar, an icon, a localized kind label, the title, an
//! optional description and a dismiss hint.

use super::notification::{Kind, Notification};
use crate::i18n::fluent::I18n;

/// ANSI accent colors per kind.
mod palette {
    pub const SUCCESS: &str = "\x1b[32m";
    pub const ERROR: &str = "\x1b[31m";
    pub const WARNING: &str = "\x1b[33m";
    pub const INFO: &str = "\x1b[34m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

const ACCENT_BAR: &str = "┃";

/// Whether rendered toasts carry ANSI color sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Ansi,
    Plain,
}

/// Toast renderer.
pub struct Toast;

impl Toast {
    /// Renders a single notification as a multi-line card (no trailing newline).
    pub fn render(notification: &Notification, i18n: &I18n, mode: ColorMode) -> String {
        let kind = notification.kind();
        let bar = paint(ACCENT_BAR, Self::accent(kind), mode);
        let header = paint(
            &format!("{} {}", Self::icon(kind), i18n.tr(kind.label_key())),
            Self::accent(kind),
            mode,
        );
        let title = paint(notification.title(), palette::BOLD, mode);

        let mut lines = vec![format!("{bar} {header} · {title}")];
        if let Some(description) = notification.description() {
            lines.push(format!("{bar}   {description}"));
        }
        let id = notification.id().to_string();
        let hint = i18n.tr_with_args("toast-dismiss-hint", &[("id", id.as_str())]);
        lines.push(format!("{bar}   {}", paint(&format!("[{hint}]"), palette::DIM, mode)));
        lines.join("\n")
    }

    /// Renders the whole active collection, oldest first, one blank line
    /// between cards. Returns an empty string when nothing is active.
    pub fn render_stack(notifications: &[Notification], i18n: &I18n, mode: ColorMode) -> String {
        notifications
            .iter()
            .map(|notification| Self::render(notification, i18n, mode))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Returns the icon glyph for the kind.
    #[must_use]
    pub fn icon(kind: Kind) -> &'static str {
        match kind {
            Kind::Success => "✔",
            Kind::Error => "✖",
            Kind::Warning => "⚠",
            Kind::Info => "ℹ",
        }
    }

    fn accent(kind: Kind) -> &'static str {
        match kind {
            Kind::Success => palette::SUCCESS,
            Kind::Error => palette::ERROR,
            Kind::Warning => palette::WARNING,
            Kind::Info => palette::INFO,
        }
    }
}

fn paint(text: &str, color: &str, mode: ColorMode) -> String {
    match mode {
        ColorMode::Ansi => format!("{color}{text}{}", palette::RESET),
        ColorMode::Plain => text.to_string(),
    }
}
