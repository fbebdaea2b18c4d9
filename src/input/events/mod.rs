//! # Input Events
//!
//! Raw bytes in, editing commands out.

pub mod key_decoder;
pub mod types;

pub use key_decoder::KeyDecoder;
pub use types::{DecoderState, EditCommand};
