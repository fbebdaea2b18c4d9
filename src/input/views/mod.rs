//! # Views
//!
//! Everything that decides what the prompt line looks like.

pub mod ansi_escape_codes;
pub mod line_renderer;
pub mod message;

pub use line_renderer::LineRenderer;
pub use message::{
    flatten_line, style_or_plain, AnsiStyler, DisplayAttribute, MessageStyler, PlainStyler,
    ERROR_ATTRIBUTES, HINT_ATTRIBUTES,
};
