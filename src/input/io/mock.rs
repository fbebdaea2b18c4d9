//! # Mock I/O Implementations for Testing
//!
//! Provides mock implementations of ByteStream and RenderStream traits
//! for testing without terminal dependencies.

use super::{ByteStream, RawInput, RenderStream};
use anyhow::Result;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Mock byte stream for testing
///
/// Provides pre-programmed input that can be consumed by tests. `poll` only
/// reports readiness while input remains, so a trailing lone `ESC` times out
/// the same way it would on a real terminal.
#[derive(Debug, Default)]
pub struct MockByteStream {
    inputs: VecDeque<Queued>,
    captures: usize,
    restores: usize,
    discards: usize,
    capturing: bool,
}

#[derive(Debug, Clone, Copy)]
struct Queued {
    input: RawInput,
    /// Typed while nothing was reading; dropped by `discard_pending`
    typeahead: bool,
}

impl MockByteStream {
    /// Create a stream that yields `bytes` in order
    pub fn new(bytes: &[u8]) -> Self {
        let mut stream = Self::default();
        stream.push_bytes(bytes);
        stream
    }

    /// Queue raw bytes
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.queue(bytes, false);
    }

    /// Queue bytes typed ahead between reads, e.g. during an error display
    pub fn push_typeahead(&mut self, bytes: &[u8]) {
        self.queue(bytes, true);
    }

    fn queue(&mut self, bytes: &[u8], typeahead: bool) {
        self.inputs.extend(bytes.iter().map(|b| Queued {
            input: RawInput::Byte(*b),
            typeahead,
        }));
    }

    /// Queue the UTF-8 bytes of `text`
    pub fn push_str(&mut self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    /// Queue an out-of-band interrupt (a signal rather than a byte)
    pub fn push_interrupt(&mut self) {
        self.inputs.push_back(Queued {
            input: RawInput::Interrupt,
            typeahead: false,
        });
    }

    /// Number of queued inputs not yet read
    pub fn pending_count(&self) -> usize {
        self.inputs.len()
    }

    /// How many times interrupts were captured
    pub fn capture_count(&self) -> usize {
        self.captures
    }

    /// How many times interrupts were restored
    pub fn restore_count(&self) -> usize {
        self.restores
    }

    /// How many times pending input was discarded
    pub fn discard_count(&self) -> usize {
        self.discards
    }

    /// Whether interrupts are currently captured
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }
}

impl ByteStream for MockByteStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.inputs.is_empty())
    }

    fn read(&mut self) -> Result<RawInput> {
        self.inputs
            .pop_front()
            .map(|queued| queued.input)
            .ok_or_else(|| anyhow::anyhow!("No input available"))
    }

    fn capture_interrupts(&mut self) -> Result<()> {
        self.captures += 1;
        self.capturing = true;
        Ok(())
    }

    fn restore_interrupts(&mut self) -> Result<()> {
        self.restores += 1;
        self.capturing = false;
        Ok(())
    }

    fn discard_pending(&mut self) -> Result<()> {
        self.discards += 1;
        while self.inputs.front().is_some_and(|queued| queued.typeahead) {
            self.inputs.pop_front();
        }
        Ok(())
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    MoveLeft(u16),
    MoveRight(u16),
    MoveUp(u16),
    MoveToLineStart,
    ClearToEndOfLine,
    ClearLine,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

/// Minimal line-oriented screen model fed by the mock
///
/// Understands printable text, `\r`, `\n`, the relative movement commands and
/// line clearing. SGR sequences in written text are skipped.
#[derive(Debug, Clone)]
struct Screen {
    rows: Vec<Vec<char>>,
    row: usize,
    column: usize,
}

impl Screen {
    fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            row: 0,
            column: 0,
        }
    }

    fn line(&mut self) -> &mut Vec<char> {
        &mut self.rows[self.row]
    }

    fn put(&mut self, ch: char) {
        let column = self.column;
        let line = self.line();
        if line.len() < column {
            line.resize(column, ' ');
        }
        if column < line.len() {
            line[column] = ch;
        } else {
            line.push(ch);
        }
        self.column += 1;
    }

    fn write(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => self.column = 0,
                '\n' => {
                    self.row += 1;
                    if self.row == self.rows.len() {
                        self.rows.push(Vec::new());
                    }
                }
                '\x1b' => {
                    // skip CSI: ESC [ params final
                    if chars.peek() == Some(&'[') {
                        chars.next();
                        for c in chars.by_ref() {
                            if ('\x40'..='\x7e').contains(&c) {
                                break;
                            }
                        }
                    }
                }
                c => self.put(c),
            }
        }
    }
}

#[derive(Debug)]
struct MockTerminalState {
    commands: Vec<RenderCommand>,
    output: Vec<u8>,
    screen: Screen,
    raw_mode: bool,
    raw_mode_enables: usize,
}

/// Mock render stream for testing
///
/// Records all rendering commands for verification in tests. Clones share the
/// same recorded state, so a test can keep a handle after moving the stream
/// into a session.
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    state: Arc<Mutex<MockTerminalState>>,
}

impl MockRenderStream {
    /// Create a new mock render stream in cooked mode
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockTerminalState {
                commands: Vec::new(),
                output: Vec::new(),
                screen: Screen::new(),
                raw_mode: false,
                raw_mode_enables: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockTerminalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.state().commands.push(command);
    }

    /// Get recorded commands for verification
    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.state().commands.clone()
    }

    /// Clear recorded commands
    pub fn clear_commands(&mut self) {
        self.state().commands.clear();
    }

    /// Check if a specific command was recorded
    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.state().commands.contains(command)
    }

    /// Everything written so far, escape sequences included
    pub fn get_output_string(&self) -> String {
        String::from_utf8_lossy(&self.state().output).to_string()
    }

    /// Visible text of every screen row, trailing blanks trimmed
    pub fn screen_lines(&self) -> Vec<String> {
        self.state()
            .screen
            .rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Visible text of the row holding the cursor
    pub fn current_line(&self) -> String {
        let state = self.state();
        let row = &state.screen.rows[state.screen.row];
        row.iter().collect::<String>().trim_end().to_string()
    }

    /// Cursor position as (column, row)
    pub fn cursor(&self) -> (usize, usize) {
        let state = self.state();
        (state.screen.column, state.screen.row)
    }

    /// How many times raw mode was entered
    pub fn raw_mode_enable_count(&self) -> usize {
        self.state().raw_mode_enables
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut state = self.state();
        state.output.extend_from_slice(buf);
        let text = String::from_utf8_lossy(buf).to_string();
        state.screen.write(&text);
        state.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn move_left(&mut self, columns: u16) -> Result<()> {
        let mut state = self.state();
        state.screen.column = state.screen.column.saturating_sub(usize::from(columns));
        state.commands.push(RenderCommand::MoveLeft(columns));
        Ok(())
    }

    fn move_right(&mut self, columns: u16) -> Result<()> {
        let mut state = self.state();
        state.screen.column += usize::from(columns);
        state.commands.push(RenderCommand::MoveRight(columns));
        Ok(())
    }

    fn move_up(&mut self, rows: u16) -> Result<()> {
        let mut state = self.state();
        state.screen.row = state.screen.row.saturating_sub(usize::from(rows));
        state.commands.push(RenderCommand::MoveUp(rows));
        Ok(())
    }

    fn move_to_line_start(&mut self) -> Result<()> {
        let mut state = self.state();
        state.screen.column = 0;
        state.commands.push(RenderCommand::MoveToLineStart);
        Ok(())
    }

    fn clear_to_end_of_line(&mut self) -> Result<()> {
        let mut state = self.state();
        let column = state.screen.column;
        state.screen.line().truncate(column);
        state.commands.push(RenderCommand::ClearToEndOfLine);
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        let mut state = self.state();
        state.screen.line().clear();
        state.commands.push(RenderCommand::ClearLine);
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut state = self.state();
        state.raw_mode = true;
        state.raw_mode_enables += 1;
        state.commands.push(RenderCommand::EnableRawMode);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut state = self.state();
        state.raw_mode = false;
        state.commands.push(RenderCommand::DisableRawMode);
        Ok(())
    }

    fn is_raw_mode(&self) -> bool {
        self.state().raw_mode
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
