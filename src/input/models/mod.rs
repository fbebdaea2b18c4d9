//! # Models
//!
//! Data the input engine works with: the caller's spec, the mode
//! capabilities, and the per-attempt edit buffer.

pub mod edit_buffer;
pub mod input_mode;
pub mod input_spec;

pub use edit_buffer::{BufferChange, EditBuffer};
pub use input_mode::{CharFilter, InputMode};
pub use input_spec::{parse_yes_no, InputSpec};
