//! # Line Editor
//!
//! Runs one editing attempt: reads bytes, decodes them into commands, applies
//! each command to the [`EditBuffer`] and then mirrors the change on screen.
//!
//! The editor assumes raw mode is already active and the prompt has been
//! drawn; it only ever writes on the prompt line, to the right of the prompt.

use crate::config::SessionConfig;
use crate::input::events::{EditCommand, KeyDecoder};
use crate::input::io::{ByteStream, RawInput, RenderStream};
use crate::input::models::{parse_yes_no, EditBuffer, InputMode, InputSpec};
use crate::input::views::LineRenderer;
use anyhow::Result;

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Enter was pressed; the buffer (or substituted default) is the candidate
    Submitted(String),
    /// Ctrl-C or SIGINT
    Interrupted,
}

pub struct LineEditor<'a> {
    spec: &'a InputSpec,
    config: &'a SessionConfig,
    decoder: KeyDecoder,
    renderer: LineRenderer,
    buffer: EditBuffer,
}

impl<'a> LineEditor<'a> {
    pub fn new(spec: &'a InputSpec, config: &'a SessionConfig) -> Self {
        Self {
            spec,
            config,
            decoder: KeyDecoder::new(),
            renderer: LineRenderer::new(spec.mode, config.mask_glyph),
            buffer: EditBuffer::from_text(spec.initial_buffer()),
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Edit until Enter or an interrupt
    pub fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<EditOutcome>
    where
        I: ByteStream + ?Sized,
        O: RenderStream + ?Sized,
    {
        if !self.buffer.is_empty() {
            self.renderer.render_buffer(output, &self.buffer)?;
        }
        output.flush()?;

        loop {
            let Some(command) = self.next_command(input)? else {
                continue;
            };
            self.log_command(command);

            let outcome = match self.spec.mode {
                InputMode::YesNo => self.apply_yes_no(command, output)?,
                _ => self.apply(command, output)?,
            };
            output.flush()?;

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    /// Read one byte (or interrupt) and decode it
    ///
    /// While an escape sequence is pending the wait is bounded by
    /// `escape_timeout`; on expiry the pending bytes are dropped.
    fn next_command<I: ByteStream + ?Sized>(
        &mut self,
        input: &mut I,
    ) -> Result<Option<EditCommand>> {
        if self.decoder.is_escape_pending() && !input.poll(self.config.escape_timeout)? {
            self.decoder.timeout();
            return Ok(None);
        }

        match input.read()? {
            RawInput::Interrupt => Ok(Some(EditCommand::Interrupt)),
            RawInput::Byte(byte) => Ok(self.decoder.feed(byte)),
        }
    }

    fn apply<O: RenderStream + ?Sized>(
        &mut self,
        command: EditCommand,
        output: &mut O,
    ) -> Result<Option<EditOutcome>> {
        let change = match command {
            EditCommand::Insert(ch) => {
                if !self.spec.mode.accepts_char(ch) {
                    tracing::trace!("keystroke rejected by {} filter", self.spec.mode);
                    return Ok(None);
                }
                if self
                    .spec
                    .typing_limit()
                    .is_some_and(|max| self.buffer.len() >= max)
                {
                    tracing::trace!("buffer already at max_length");
                    return Ok(None);
                }
                self.buffer.insert(ch)
            }
            EditCommand::DeleteBackward => self.buffer.delete_before_cursor(),
            EditCommand::DeleteForward => self.buffer.delete_at_cursor(),
            EditCommand::MoveLeft => self.buffer.move_left(),
            EditCommand::MoveRight => self.buffer.move_right(),
            EditCommand::MoveHome => self.buffer.move_home(),
            EditCommand::MoveEnd => self.buffer.move_end(),
            EditCommand::Submit => return self.submit(output).map(Some),
            EditCommand::Interrupt => return Ok(Some(EditOutcome::Interrupted)),
        };

        self.renderer.render_change(output, &self.buffer, &change)?;
        Ok(None)
    }

    fn submit<O: RenderStream + ?Sized>(&mut self, output: &mut O) -> Result<EditOutcome> {
        if self.buffer.is_empty() {
            if let Some(default) = self.spec.effective_default() {
                let change = self.buffer.replace_all(default);
                self.renderer.render_change(output, &self.buffer, &change)?;
            }
        }
        Ok(EditOutcome::Submitted(self.buffer.text()))
    }

    /// Single-keystroke answer; the buffer is never used
    fn apply_yes_no<O: RenderStream + ?Sized>(
        &mut self,
        command: EditCommand,
        output: &mut O,
    ) -> Result<Option<EditOutcome>> {
        let answer = match command {
            EditCommand::Insert(ch) => parse_yes_no(ch.encode_utf8(&mut [0; 4])),
            EditCommand::Submit => self.spec.yes_no_default(),
            EditCommand::Interrupt => return Ok(Some(EditOutcome::Interrupted)),
            _ => None,
        };

        let Some(yes) = answer else {
            return Ok(None);
        };
        let text = if yes { "Y" } else { "N" };
        self.renderer.echo(output, text)?;
        Ok(Some(EditOutcome::Submitted(text.to_string())))
    }

    fn log_command(&self, command: EditCommand) {
        match command {
            EditCommand::Insert(_) if self.spec.mode.is_masked() => {
                tracing::debug!("command: Insert(<masked>)");
            }
            _ => tracing::debug!("command: {:?}", command),
        }
    }
}
