//! # promptline - Controlled Terminal Input
//!
//! Asks one question on an interactive terminal and returns an answer that is
//! guaranteed to satisfy its [`InputSpec`]. Keystrokes are filtered by
//! [`InputMode`] while typing, the candidate is validated after Enter, and a
//! rejected answer is re-prompted on the same line.
//!
//! ```no_run
//! use promptline::{prompt, InputMode, InputSpec, SessionResult};
//!
//! let spec = InputSpec::new("Port: ", InputMode::Numeric)
//!     .with_value_range(Some(1024), Some(65535))
//!     .with_default("8080");
//!
//! match prompt(&spec)? {
//!     SessionResult::Accepted(port) => println!("using port {port}"),
//!     SessionResult::Interrupted => println!("cancelled"),
//! }
//! # Ok::<(), promptline::InputError>(())
//! ```
//!
//! ## Architecture
//!
//! The terminal is reached only through the [`ByteStream`] and
//! [`RenderStream`] traits, so the whole prompt loop runs headless against
//! [`MockByteStream`] and [`MockRenderStream`] in tests.

pub mod cmd_args;
pub mod config;
pub mod input;

// Re-export main types for easy access
pub use config::SessionConfig;
pub use input::*;
