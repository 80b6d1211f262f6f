//! A single USSD screen and its wire framing.

use serde::Serialize;

/// Body sent when a turn cannot be served.
pub const UNAVAILABLE_TEXT: &str = "Service temporarily unavailable. Please try again later.";

/// Text to display plus whether the dialog ends after it.
///
/// Terminal-ness is decided by the branch that builds the screen, never by
/// inspecting the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub text: String,
    pub terminal: bool,
}

impl Screen {
    /// A screen that keeps the session open for another keystroke.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminal: false,
        }
    }

    /// A screen that ends the session.
    pub fn end(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            terminal: true,
        }
    }

    pub fn unavailable() -> Self {
        Self::end(UNAVAILABLE_TEXT)
    }

    /// Frames the screen as `CON <text>` or `END <text>`.
    pub fn render(&self) -> String {
        let prefix = if self.terminal { "END" } else { "CON" };
        format!("{} {}", prefix, self.text)
    }
}
