//! # Terminal I/O Implementations
//!
//! Production implementations of the I/O abstractions.
//! All crossterm and libc calls are isolated to this module.

use super::{ByteStream, RawInput, RenderStream};
use anyhow::Result;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

#[cfg(unix)]
use super::interrupt::{self, InterruptCapture};

/// Bytes requested from the kernel per read; pasted text arrives in bursts.
#[cfg(unix)]
const READ_CHUNK: usize = 64;

/// Terminal-based byte stream reading stdin directly
///
/// Bytes are read with `read(2)` rather than through `std::io::Stdin`, whose
/// internal buffer would hide pending bytes from `poll(2)` and break escape
/// sequence timing.
#[cfg(unix)]
pub struct TerminalByteStream {
    fd: libc::c_int,
    pending: VecDeque<u8>,
    interrupts: Option<InterruptCapture>,
}

#[cfg(unix)]
impl TerminalByteStream {
    /// Create a byte stream over stdin
    pub fn new() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
            pending: VecDeque::new(),
            interrupts: None,
        }
    }

    /// Wait for stdin to become readable. `None` blocks indefinitely.
    ///
    /// Returns `Ok(false)` on timeout or when a signal cut the wait short.
    fn wait_readable(&self, timeout: Option<Duration>) -> io::Result<bool> {
        let timeout_ms = match timeout {
            Some(duration) => libc::c_int::try_from(duration.as_millis()).unwrap_or(libc::c_int::MAX),
            None => -1,
        };
        let mut fds = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };

        // SAFETY: `fds` is a valid, initialised pollfd and nfds is 1.
        let rc = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(rc > 0)
    }

    fn fill(&mut self) -> Result<bool> {
        let mut chunk = [0u8; READ_CHUNK];

        // SAFETY: the pointer and length describe `chunk`, which is writable.
        let n = unsafe { libc::read(self.fd, chunk.as_mut_ptr().cast(), chunk.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err.into());
        }
        if n == 0 {
            anyhow::bail!("terminal input closed");
        }

        let n = usize::try_from(n).unwrap_or(0);
        self.pending.extend(&chunk[..n]);
        Ok(true)
    }
}

#[cfg(unix)]
impl ByteStream for TerminalByteStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        if !self.pending.is_empty() || interrupt::is_pending() {
            return Ok(true);
        }
        Ok(self.wait_readable(Some(timeout))? || interrupt::is_pending())
    }

    fn read(&mut self) -> Result<RawInput> {
        loop {
            if interrupt::take_pending() {
                return Ok(RawInput::Interrupt);
            }
            if let Some(byte) = self.pending.pop_front() {
                return Ok(RawInput::Byte(byte));
            }
            if self.wait_readable(None)? {
                self.fill()?;
            }
        }
    }

    fn capture_interrupts(&mut self) -> Result<()> {
        self.interrupts = Some(InterruptCapture::install()?);
        Ok(())
    }

    fn restore_interrupts(&mut self) -> Result<()> {
        if let Some(mut capture) = self.interrupts.take() {
            capture.restore()?;
        }
        Ok(())
    }

    fn discard_pending(&mut self) -> Result<()> {
        self.pending.clear();
        // SAFETY: tcflush only touches the tty queue behind `self.fd`.
        if unsafe { libc::tcflush(self.fd, libc::TCIFLUSH) } < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }
}

#[cfg(unix)]
impl Default for TerminalByteStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal byte stream placeholder for platforms without `poll(2)`
#[cfg(not(unix))]
#[derive(Debug, Default)]
pub struct TerminalByteStream;

#[cfg(not(unix))]
impl TerminalByteStream {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl ByteStream for TerminalByteStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        anyhow::bail!("raw byte input is only supported on unix terminals")
    }

    fn read(&mut self) -> Result<RawInput> {
        anyhow::bail!("raw byte input is only supported on unix terminals")
    }
}

/// Terminal-based render stream using crossterm
///
/// Renders to the actual terminal using crossterm commands.
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    raw_mode: bool,
}

impl TerminalRenderStream<io::Stdout> {
    /// Create a new terminal render stream using stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderStream<W> {
    /// Create a terminal render stream with custom writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            raw_mode: false,
        }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> RenderStream for TerminalRenderStream<W> {
    fn move_left(&mut self, columns: u16) -> Result<()> {
        // MoveLeft(0) still moves one column on most terminals
        if columns == 0 {
            return Ok(());
        }
        execute!(self.writer, cursor::MoveLeft(columns)).map_err(anyhow::Error::from)
    }

    fn move_right(&mut self, columns: u16) -> Result<()> {
        if columns == 0 {
            return Ok(());
        }
        execute!(self.writer, cursor::MoveRight(columns)).map_err(anyhow::Error::from)
    }

    fn move_up(&mut self, rows: u16) -> Result<()> {
        if rows == 0 {
            return Ok(());
        }
        execute!(self.writer, cursor::MoveUp(rows)).map_err(anyhow::Error::from)
    }

    fn move_to_line_start(&mut self) -> Result<()> {
        execute!(self.writer, cursor::MoveToColumn(0)).map_err(anyhow::Error::from)
    }

    fn clear_to_end_of_line(&mut self) -> Result<()> {
        execute!(self.writer, Clear(ClearType::UntilNewLine)).map_err(anyhow::Error::from)
    }

    fn clear_line(&mut self) -> Result<()> {
        execute!(self.writer, Clear(ClearType::CurrentLine)).map_err(anyhow::Error::from)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.raw_mode = false;
        Ok(())
    }

    /// Raw mode as crossterm tracks it process-wide, so a host that enabled
    /// it before the prompt is seen as the owner
    fn is_raw_mode(&self) -> bool {
        terminal::is_raw_mode_enabled().unwrap_or(self.raw_mode)
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}
