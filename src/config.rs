//! Configuration constants and session tuning for promptline
//!
//! The library never reads the environment; the binary maps its flags onto
//! [`SessionConfig`].

use std::time::Duration;

/// How long to wait for the rest of an escape sequence after `ESC`
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

/// How long a validation error stays on screen before the prompt is redrawn
pub const DEFAULT_ERROR_DISPLAY_DURATION: Duration = Duration::from_millis(1500);

/// Glyph shown for each character typed in password mode
pub const DEFAULT_MASK_GLYPH: char = '*';

/// Prefix of the transient error line
pub const ERROR_PREFIX: &str = "✗ ";

/// Environment variable the binary reads its log filter from
pub const LOG_LEVEL_ENV_VAR: &str = "PROMPTLINE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub escape_timeout: Duration,
    pub error_display_duration: Duration,
    pub mask_glyph: char,
    /// Style the hint and error line with ANSI attributes
    pub color: bool,
}

impl SessionConfig {
    pub fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    pub fn with_error_display_duration(mut self, duration: Duration) -> Self {
        self.error_display_duration = duration;
        self
    }

    pub fn with_mask_glyph(mut self, glyph: char) -> Self {
        self.mask_glyph = glyph;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
            error_display_duration: DEFAULT_ERROR_DISPLAY_DURATION,
            mask_glyph: DEFAULT_MASK_GLYPH,
            color: true,
        }
    }
}
