//! ANSI SGR codes used by the prompt and error line
//!
//! Cursor movement and line erasure go through crossterm commands in
//! [`crate::input::io::terminal`]; only text attributes are written inline.

// ============================================================================
// TEXT ATTRIBUTES
// ============================================================================

pub const RESET: &str = "\x1b[0m"; // Reset all attributes
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m"; // Dimmed/faint text
pub const UNDERLINE: &str = "\x1b[4m";
pub const BLINK: &str = "\x1b[5m"; // Blinking text (not widely supported)

// ============================================================================
// STANDARD FOREGROUND COLORS (30-37)
// ============================================================================

pub const FG_RED: &str = "\x1b[31m";
pub const FG_GREEN: &str = "\x1b[32m";
pub const FG_YELLOW: &str = "\x1b[33m";
pub const FG_CYAN: &str = "\x1b[36m";

// ============================================================================
// BRIGHT FOREGROUND COLORS (90-97)
// ============================================================================

pub const FG_BRIGHT_BLACK: &str = "\x1b[90m"; // Also known as dark gray
