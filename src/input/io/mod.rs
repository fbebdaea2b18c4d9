//! # I/O Abstraction Layer
//!
//! Trait seams between the line editor and the terminal device so the editing
//! logic can run against real stdin/stdout or against scripted mocks.
//!
//! ## Design Principles
//!
//! - **ByteStream**: raw input bytes plus out-of-band interrupts
//! - **RenderStream**: cursor-relative output and raw-mode switching
//! - **Clean Separation**: all crossterm/libc calls live in [`terminal`]
//!
//! ## Architecture
//!
//! ```text
//! Production:  InputSession ──▶ TerminalByteStream   ──▶ poll(2) + read(2) on stdin
//!                           ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     InputSession ──▶ MockByteStream       ──▶ VecDeque<RawInput>
//!                           ──▶ MockRenderStream     ──▶ Vec<RenderCommand> + screen model
//! ```

use anyhow::Result;
use std::io::Write;
use std::time::Duration;

#[cfg(unix)]
pub mod interrupt;
pub mod mock;
pub mod terminal;

pub use mock::{MockByteStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalByteStream, TerminalRenderStream};

/// One unit of input delivered by a [`ByteStream`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// A single byte read from the terminal
    Byte(u8),
    /// An interrupt delivered outside the byte stream (e.g. SIGINT)
    Interrupt,
}

/// Raw input source
///
/// Delivers terminal input one byte at a time. Interrupts that do not arrive
/// as bytes (signals) are reported as [`RawInput::Interrupt`].
pub trait ByteStream {
    /// Wait up to `timeout` for input to become available.
    ///
    /// Returns true if a subsequent [`ByteStream::read`] will not block.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Block until the next byte or interrupt is available.
    fn read(&mut self) -> Result<RawInput>;

    /// Start routing process interrupts into this stream.
    ///
    /// Implementations must remember the disposition they replace so that
    /// [`ByteStream::restore_interrupts`] can put it back.
    fn capture_interrupts(&mut self) -> Result<()> {
        Ok(())
    }

    /// Reinstate the interrupt disposition saved by `capture_interrupts`.
    fn restore_interrupts(&mut self) -> Result<()> {
        Ok(())
    }

    /// Drop input typed ahead while the terminal was not being read.
    fn discard_pending(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Output render stream abstraction
///
/// All movement is relative to the current cursor so the editor never needs
/// to know its absolute screen position.
pub trait RenderStream: Write {
    /// Move the cursor left by `columns` (no-op for 0)
    fn move_left(&mut self, columns: u16) -> Result<()>;

    /// Move the cursor right by `columns` (no-op for 0)
    fn move_right(&mut self, columns: u16) -> Result<()>;

    /// Move the cursor up by `rows`, keeping the column
    fn move_up(&mut self, rows: u16) -> Result<()>;

    /// Move the cursor to column 0 of the current line
    fn move_to_line_start(&mut self) -> Result<()>;

    /// Erase from the cursor to the end of the line
    fn clear_to_end_of_line(&mut self) -> Result<()>;

    /// Erase the whole current line without moving the cursor
    fn clear_line(&mut self) -> Result<()>;

    /// Switch the terminal to raw, non-echoing mode
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// Switch the terminal back to its saved cooked mode
    fn disable_raw_mode(&mut self) -> Result<()>;

    /// Whether raw mode is currently active through this stream
    fn is_raw_mode(&self) -> bool;
}

/// Clamp a column count to what cursor movement commands accept
pub(crate) fn columns(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}
