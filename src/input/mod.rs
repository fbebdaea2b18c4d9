//! # Controlled Terminal Input
//!
//! Layering, bottom to top:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ session      prompt loop, TerminalSession guard            │
//! ├──────────────────────────────┬─────────────────────────────┤
//! │ line_editor  keys → buffer   │ validator  candidate checks │
//! ├──────────────┬───────────────┼─────────────────────────────┤
//! │ events       │ views         │ models                      │
//! │ KeyDecoder   │ LineRenderer  │ InputSpec, EditBuffer       │
//! ├──────────────┴───────────────┴─────────────────────────────┤
//! │ io           ByteStream / RenderStream (terminal + mock)   │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod events;
pub mod io;
pub mod line_editor;
pub mod models;
pub mod session;
pub mod validator;
pub mod views;

pub use error::InputError;
pub use events::{DecoderState, EditCommand, KeyDecoder};
pub use io::{
    ByteStream, MockByteStream, MockRenderStream, RawInput, RenderCommand, RenderStream,
    TerminalByteStream, TerminalRenderStream,
};
pub use line_editor::{EditOutcome, LineEditor};
pub use models::{BufferChange, EditBuffer, InputMode, InputSpec};
pub use session::{
    prompt, prompt_on, prompt_with_config, InputSession, SessionResult, TerminalSession,
};
pub use validator::{validate, Rejection};
pub use views::{AnsiStyler, DisplayAttribute, MessageStyler, PlainStyler};
