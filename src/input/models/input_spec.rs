//! # Input Specification
//!
//! Caller-owned, read-only description of one prompt: what to ask, which
//! mode to use, and the constraints the answer must meet.

use super::input_mode::InputMode;
use crate::input::error::InputError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub prompt: String,
    pub mode: InputMode,
    /// Minimum character count (ignored for `YesNo`)
    #[serde(default)]
    pub min_length: usize,
    /// Maximum character count; also caps typing (ignored for `YesNo`)
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Lowest accepted value (`Numeric` only)
    #[serde(default)]
    pub min_value: Option<u64>,
    /// Highest accepted value (`Numeric` only)
    #[serde(default)]
    pub max_value: Option<u64>,
    /// Shown as a hint and used when the buffer is empty on Enter
    #[serde(default)]
    pub default: Option<String>,
    /// Editable initial buffer content; takes precedence over `default`
    #[serde(default)]
    pub prefill: Option<String>,
    /// Replaces every validation reason when set
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub allow_empty: bool,
}

impl InputSpec {
    pub fn new(prompt: impl Into<String>, mode: InputMode) -> Self {
        Self {
            prompt: prompt.into(),
            mode,
            min_length: 0,
            max_length: None,
            min_value: None,
            max_value: None,
            default: None,
            prefill: None,
            error_message: None,
            allow_empty: false,
        }
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_value_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_prefill(mut self, prefill: impl Into<String>) -> Self {
        self.prefill = Some(prefill.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Text the edit buffer starts with on every attempt
    pub fn initial_buffer(&self) -> &str {
        match self.mode {
            InputMode::YesNo => "",
            _ => self.prefill.as_deref().unwrap_or(""),
        }
    }

    /// Default in effect: a prefill suppresses it
    pub fn effective_default(&self) -> Option<&str> {
        if self.prefill.is_some() && self.mode != InputMode::YesNo {
            return None;
        }
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    /// Polarity of a `YesNo` default: `Some(true)` for yes
    pub fn yes_no_default(&self) -> Option<bool> {
        self.effective_default().and_then(parse_yes_no)
    }

    /// Maximum length that applies to typing, if any
    pub fn typing_limit(&self) -> Option<usize> {
        if self.mode.uses_length_bounds() {
            self.max_length
        } else {
            None
        }
    }

    /// Reject malformed specs before any terminal interaction
    pub fn check(&self) -> Result<(), InputError> {
        let invalid =
            |reason: String| -> Result<(), InputError> { Err(InputError::InvalidSpec(reason)) };

        if let Some(max) = self.max_length {
            if self.min_length > max {
                return invalid(format!(
                    "min_length {} exceeds max_length {max}",
                    self.min_length
                ));
            }
        }

        if self.mode != InputMode::Numeric
            && (self.min_value.is_some() || self.max_value.is_some())
        {
            return invalid(format!(
                "min_value/max_value only apply to numeric mode, not {}",
                self.mode
            ));
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return invalid(format!("min_value {min} exceeds max_value {max}"));
            }
        }

        if self.mode == InputMode::YesNo {
            if let Some(default) = self.default.as_deref() {
                if parse_yes_no(default).is_none() {
                    return invalid(format!("yes/no default must be y or n, got '{default}'"));
                }
            }
            return Ok(());
        }

        // Both end up in the buffer, so both must be typeable
        let seeded = [
            ("prefill", self.prefill.as_deref()),
            ("default", self.effective_default()),
        ];
        for (label, text) in seeded {
            let Some(text) = text else { continue };
            let count = text.chars().count();
            if self.max_length.is_some_and(|max| count > max) {
                return invalid(format!("{label} is longer than max_length ({count} chars)"));
            }
            if let Some(bad) = text.chars().find(|ch| !self.mode.accepts_char(*ch)) {
                return invalid(format!(
                    "{label} contains '{bad}', which {} mode does not accept",
                    self.mode
                ));
            }
        }

        Ok(())
    }
}

/// `y`/`yes` → true, `n`/`no` → false, case-insensitive
pub fn parse_yes_no(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
