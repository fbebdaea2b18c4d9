//! # Message Styling
//!
//! Boundary with the message-formatting layer. The session asks a
//! [`MessageStyler`] to decorate a single line; when styling fails it prints
//! the plain text instead of failing the prompt.
//!
//! Styled output must leave the cursor where plain text would, so stylers may
//! only add SGR attributes and the text itself is flattened to one line first.

use super::ansi_escape_codes as ansi;
use anyhow::Result;

/// Closed set of text attributes a styler can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAttribute {
    Bold,
    Dim,
    Underline,
    Blink,
    Red,
    Green,
    Yellow,
    Cyan,
    Gray,
}

impl DisplayAttribute {
    pub fn sgr(self) -> &'static str {
        match self {
            DisplayAttribute::Bold => ansi::BOLD,
            DisplayAttribute::Dim => ansi::DIM,
            DisplayAttribute::Underline => ansi::UNDERLINE,
            DisplayAttribute::Blink => ansi::BLINK,
            DisplayAttribute::Red => ansi::FG_RED,
            DisplayAttribute::Green => ansi::FG_GREEN,
            DisplayAttribute::Yellow => ansi::FG_YELLOW,
            DisplayAttribute::Cyan => ansi::FG_CYAN,
            DisplayAttribute::Gray => ansi::FG_BRIGHT_BLACK,
        }
    }
}

/// Attributes of the transient validation error line
pub const ERROR_ATTRIBUTES: &[DisplayAttribute] = &[
    DisplayAttribute::Red,
    DisplayAttribute::Bold,
    DisplayAttribute::Blink,
];

/// Attributes of the default-value hint after the prompt
pub const HINT_ATTRIBUTES: &[DisplayAttribute] = &[DisplayAttribute::Dim];

/// Decorates a single line of text
pub trait MessageStyler {
    fn style(&self, text: &str, attributes: &[DisplayAttribute]) -> Result<String>;
}

/// SGR-based styler for ANSI terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl MessageStyler for AnsiStyler {
    fn style(&self, text: &str, attributes: &[DisplayAttribute]) -> Result<String> {
        if attributes.is_empty() {
            return Ok(text.to_string());
        }
        let codes: String = attributes.iter().map(|a| a.sgr()).collect();
        Ok(format!("{codes}{text}{}", ansi::RESET))
    }
}

/// Styler that leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl MessageStyler for PlainStyler {
    fn style(&self, text: &str, _attributes: &[DisplayAttribute]) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Replace control characters so the text occupies exactly one line
pub fn flatten_line(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

/// Style `text`, falling back to the plain line if the styler fails
pub fn style_or_plain(
    styler: &dyn MessageStyler,
    text: &str,
    attributes: &[DisplayAttribute],
) -> String {
    let line = flatten_line(text);
    match styler.style(&line, attributes) {
        Ok(styled) => styled,
        Err(e) => {
            tracing::warn!("Message styling failed, using plain text: {}", e);
            line
        }
    }
}
