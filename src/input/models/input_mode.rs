//! # Input Modes
//!
//! Each mode carries two capabilities: a per-keystroke character filter used
//! by the line editor, and a post-submit shape rule used by the validator.
//! Adding a mode means adding a variant here plus its filter, and a shape rule
//! in [`crate::input::validator`].

use crate::input::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Numeric,
    Password,
    #[serde(rename = "yesno")]
    YesNo,
    Email,
    Phone,
    #[serde(rename = "ipv4")]
    IPv4,
    #[serde(rename = "ipv6")]
    IPv6,
}

/// Keystroke predicate for a mode
pub type CharFilter = fn(char) -> bool;

fn any_printable(ch: char) -> bool {
    !ch.is_control()
}

fn decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn email_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '+' | '.' | '@' | '_' | '-')
}

fn phone_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '-'
}

fn ipv4_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn ipv6_char(ch: char) -> bool {
    ch.is_ascii_hexdigit() || ch == ':' || ch == '/'
}

fn yes_no_char(ch: char) -> bool {
    matches!(ch, 'y' | 'Y' | 'n' | 'N')
}

impl InputMode {
    pub const ALL: [InputMode; 8] = [
        InputMode::Text,
        InputMode::Numeric,
        InputMode::Password,
        InputMode::YesNo,
        InputMode::Email,
        InputMode::Phone,
        InputMode::IPv4,
        InputMode::IPv6,
    ];

    /// The keystroke filter for this mode
    pub fn char_filter(self) -> CharFilter {
        match self {
            InputMode::Text | InputMode::Password => any_printable,
            InputMode::Numeric => decimal_digit,
            InputMode::Email => email_char,
            InputMode::Phone => phone_char,
            InputMode::IPv4 => ipv4_char,
            InputMode::IPv6 => ipv6_char,
            InputMode::YesNo => yes_no_char,
        }
    }

    pub fn accepts_char(self, ch: char) -> bool {
        (self.char_filter())(ch)
    }

    /// Whether typed characters are replaced by a mask glyph on screen
    pub fn is_masked(self) -> bool {
        self == InputMode::Password
    }

    /// Whether min/max length constraints apply
    pub fn uses_length_bounds(self) -> bool {
        self != InputMode::YesNo
    }

    pub fn name(self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Numeric => "numeric",
            InputMode::Password => "password",
            InputMode::YesNo => "yesno",
            InputMode::Email => "email",
            InputMode::Phone => "phone",
            InputMode::IPv4 => "ipv4",
            InputMode::IPv6 => "ipv6",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(InputMode::Text),
            "numeric" | "number" => Ok(InputMode::Numeric),
            "password" => Ok(InputMode::Password),
            "yesno" | "yes-no" | "yn" => Ok(InputMode::YesNo),
            "email" => Ok(InputMode::Email),
            "phone" => Ok(InputMode::Phone),
            "ipv4" => Ok(InputMode::IPv4),
            "ipv6" => Ok(InputMode::IPv6),
            other => Err(InputError::InvalidSpec(format!(
                "unknown input mode '{other}'"
            ))),
        }
    }
}
