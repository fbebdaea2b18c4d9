//! # Controlled Input Session
//!
//! Prompt, edit, validate, repeat. Each attempt runs inside a
//! [`TerminalSession`] so raw mode and interrupt capture are only active while
//! keys are being read; validation and the error line happen in cooked mode.
//!
//! ```text
//!  check spec ─▶ draw prompt ─▶ [raw mode ─▶ LineEditor ─▶ release] ─▶ validate
//!                    ▲                                                  │
//!                    └──── erase error line ◀── show error ◀── reject ──┘
//! ```

use crate::config::{SessionConfig, ERROR_PREFIX};
use crate::input::error::InputError;
use crate::input::io::{ByteStream, RenderStream};
use crate::input::line_editor::{EditOutcome, LineEditor};
use crate::input::models::InputSpec;
use crate::input::validator::{validate, Rejection};
use crate::input::views::{
    style_or_plain, AnsiStyler, LineRenderer, MessageStyler, PlainStyler, ERROR_ATTRIBUTES,
};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::thread;

/// Final answer of a prompt; validation failures never end a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum SessionResult {
    Accepted(String),
    Interrupted,
}

/// Scoped ownership of the terminal mode
///
/// Acquires raw mode on the render stream, then interrupt capture on the byte
/// stream. Both are released in reverse order exactly once, by
/// [`TerminalSession::release`] or on drop.
pub struct TerminalSession<'a, I: ByteStream + ?Sized, O: RenderStream + ?Sized> {
    input: &'a mut I,
    output: &'a mut O,
    /// Raw mode was off before acquire, so release must turn it off again
    owns_raw_mode: bool,
    active: bool,
}

impl<'a, I: ByteStream + ?Sized, O: RenderStream + ?Sized> TerminalSession<'a, I, O> {
    pub fn acquire(input: &'a mut I, output: &'a mut O) -> Result<Self> {
        let owns_raw_mode = !output.is_raw_mode();
        if owns_raw_mode {
            output.enable_raw_mode()?;
        }

        if let Err(e) = input.capture_interrupts() {
            if owns_raw_mode {
                if let Err(restore_err) = output.disable_raw_mode() {
                    tracing::warn!("Failed to leave raw mode after capture error: {}", restore_err);
                }
            }
            return Err(e);
        }

        tracing::trace!("terminal session acquired (owns_raw_mode={})", owns_raw_mode);
        Ok(Self {
            input,
            output,
            owns_raw_mode,
            active: true,
        })
    }

    pub fn streams(&mut self) -> (&mut I, &mut O) {
        (&mut *self.input, &mut *self.output)
    }

    pub fn release(mut self) -> Result<()> {
        self.release_once()
    }

    fn release_once(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        // Attempt both steps even if the first fails
        let interrupts = self.input.restore_interrupts();
        let raw_mode = if self.owns_raw_mode {
            self.output.disable_raw_mode()
        } else {
            Ok(())
        };
        tracing::trace!("terminal session released");
        interrupts.and(raw_mode)
    }
}

impl<I: ByteStream + ?Sized, O: RenderStream + ?Sized> Drop for TerminalSession<'_, I, O> {
    fn drop(&mut self) {
        if let Err(e) = self.release_once() {
            tracing::warn!("Failed to restore terminal state: {}", e);
        }
    }
}

/// Prompt loop over injected streams
pub struct InputSession<I: ByteStream, O: RenderStream> {
    input: I,
    output: O,
    config: SessionConfig,
    styler: Option<Box<dyn MessageStyler>>,
}

impl<I: ByteStream, O: RenderStream> InputSession<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            config: SessionConfig::default(),
            styler: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom styler instead of the one implied by `config.color`
    pub fn with_styler(mut self, styler: impl MessageStyler + 'static) -> Self {
        self.styler = Some(Box::new(styler));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }

    /// Ask until a valid answer is entered or the user interrupts
    pub fn prompt(&mut self, spec: &InputSpec) -> Result<SessionResult, InputError> {
        spec.check()?;
        tracing::info!("prompt started (mode={})", spec.mode);

        let renderer = LineRenderer::new(spec.mode, self.config.mask_glyph);
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let styler = resolve_styler(&self.styler, self.config.color);
            renderer.render_prompt(&mut self.output, spec, styler)?;
            self.output.flush().map_err(anyhow::Error::from)?;

            match self.attempt(spec)? {
                EditOutcome::Interrupted => {
                    self.finish_line()?;
                    tracing::info!("prompt interrupted after {} attempt(s)", attempts);
                    return Ok(SessionResult::Interrupted);
                }
                EditOutcome::Submitted(candidate) => match validate(&candidate, spec) {
                    Ok(()) => {
                        self.finish_line()?;
                        tracing::info!("input accepted after {} attempt(s)", attempts);
                        return Ok(SessionResult::Accepted(candidate));
                    }
                    Err(rejection) => {
                        tracing::debug!("attempt {} rejected: {}", attempts, rejection);
                        self.show_rejection(spec, &rejection)?;
                    }
                },
            }
        }
    }

    /// One edit inside raw mode; the guard is gone before this returns
    fn attempt(&mut self, spec: &InputSpec) -> Result<EditOutcome> {
        let mut guard = TerminalSession::acquire(&mut self.input, &mut self.output)?;
        let (input, output) = guard.streams();
        let outcome = LineEditor::new(spec, &self.config).run(input, output);
        let released = guard.release();

        let outcome = outcome?;
        released?;
        Ok(outcome)
    }

    /// Show the reason beneath the prompt, wait, then erase both lines
    fn show_rejection(&mut self, spec: &InputSpec, rejection: &Rejection) -> Result<()> {
        let reason = match spec.error_message.as_deref() {
            Some(custom) => custom.to_string(),
            None => rejection.to_string(),
        };
        let styler = resolve_styler(&self.styler, self.config.color);
        let line = style_or_plain(styler, &format!("{ERROR_PREFIX}{reason}"), ERROR_ATTRIBUTES);

        self.output.write_all(b"\r\n")?;
        self.output.clear_line()?;
        self.output.write_all(line.as_bytes())?;
        self.output.flush()?;

        thread::sleep(self.config.error_display_duration);
        // Keys typed meanwhile were echoed by the tty; the row is wiped below
        self.input.discard_pending()?;

        self.output.clear_line()?;
        self.output.move_up(1)?;
        self.output.move_to_line_start()?;
        self.output.clear_line()?;
        self.output.flush()?;
        Ok(())
    }

    fn finish_line(&mut self) -> Result<()> {
        self.output.write_all(b"\r\n")?;
        self.output.flush()?;
        Ok(())
    }
}

fn resolve_styler(custom: &Option<Box<dyn MessageStyler>>, color: bool) -> &dyn MessageStyler {
    match custom {
        Some(styler) => &**styler,
        None if color => &AnsiStyler,
        None => &PlainStyler,
    }
}

/// Prompt on the controlling terminal with default settings
pub fn prompt(spec: &InputSpec) -> Result<SessionResult, InputError> {
    prompt_with_config(spec, SessionConfig::default())
}

pub fn prompt_with_config(
    spec: &InputSpec,
    config: SessionConfig,
) -> Result<SessionResult, InputError> {
    prompt_on(std::io::stdout(), spec, config)
}

/// Read keys from stdin and draw on `writer`
///
/// The binary draws on stderr so stdout only carries the answer.
#[cfg(unix)]
pub fn prompt_on<W: Write>(
    writer: W,
    spec: &InputSpec,
    config: SessionConfig,
) -> Result<SessionResult, InputError> {
    use crate::input::io::{TerminalByteStream, TerminalRenderStream};

    spec.check()?;
    if !atty::is(atty::Stream::Stdin) {
        return Err(InputError::NotATerminal);
    }

    InputSession::new(
        TerminalByteStream::new(),
        TerminalRenderStream::with_writer(writer),
    )
    .with_config(config)
    .prompt(spec)
}

#[cfg(not(unix))]
pub fn prompt_on<W: Write>(
    _writer: W,
    spec: &InputSpec,
    _config: SessionConfig,
) -> Result<SessionResult, InputError> {
    spec.check()?;
    Err(InputError::Terminal(anyhow::anyhow!(
        "controlled input is only supported on unix terminals"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::io::{MockByteStream, MockRenderStream, RawInput, RenderCommand};
    use crate::input::models::InputMode;
    use std::time::Duration;

    fn quick_config() -> SessionConfig {
        SessionConfig::default()
            .with_error_display_duration(Duration::ZERO)
            .with_color(false)
    }

    fn mock_session(keys: &[u8]) -> (InputSession<MockByteStream, MockRenderStream>, MockRenderStream) {
        let output = MockRenderStream::new();
        let session = InputSession::new(MockByteStream::new(keys), output.clone())
            .with_config(quick_config());
        (session, output)
    }

    struct FailingCapture;

    impl ByteStream for FailingCapture {
        fn poll(&mut self, _timeout: Duration) -> Result<bool> {
            Ok(false)
        }

        fn read(&mut self) -> Result<RawInput> {
            anyhow::bail!("unused")
        }

        fn capture_interrupts(&mut self) -> Result<()> {
            anyhow::bail!("sigaction failed")
        }
    }

    #[test]
    fn guard_should_release_in_reverse_order() {
        let mut input = MockByteStream::default();
        let mut output = MockRenderStream::new();
        let terminal = output.clone();

        let guard = TerminalSession::acquire(&mut input, &mut output).unwrap();
        assert!(terminal.is_raw_mode());
        guard.release().unwrap();

        assert!(!terminal.is_raw_mode());
        assert_eq!(input.capture_count(), 1);
        assert_eq!(input.restore_count(), 1);
        assert!(!input.is_capturing());
    }

    #[test]
    fn dropping_guard_should_release_once() {
        let mut input = MockByteStream::default();
        let mut output = MockRenderStream::new();
        let terminal = output.clone();
        {
            let _guard = TerminalSession::acquire(&mut input, &mut output).unwrap();
        }
        assert!(!terminal.is_raw_mode());
        assert_eq!(input.restore_count(), 1);
        let disables = terminal
            .get_commands()
            .iter()
            .filter(|c| **c == RenderCommand::DisableRawMode)
            .count();
        assert_eq!(disables, 1);
    }

    #[test]
    fn repeated_acquire_release_should_restore_original_mode() {
        let mut input = MockByteStream::default();
        let mut output = MockRenderStream::new();
        let terminal = output.clone();
        for _ in 0..5 {
            let guard = TerminalSession::acquire(&mut input, &mut output).unwrap();
            guard.release().unwrap();
        }
        assert!(!terminal.is_raw_mode());
        assert_eq!(terminal.raw_mode_enable_count(), 5);
    }

    #[test]
    fn guard_should_leave_caller_owned_raw_mode_alone() {
        let mut input = MockByteStream::default();
        let mut output = MockRenderStream::new();
        output.enable_raw_mode().unwrap();
        let terminal = output.clone();

        let guard = TerminalSession::acquire(&mut input, &mut output).unwrap();
        guard.release().unwrap();

        assert!(terminal.is_raw_mode());
        assert_eq!(terminal.raw_mode_enable_count(), 1);
    }

    #[test]
    fn failed_interrupt_capture_should_undo_raw_mode() {
        let mut input = FailingCapture;
        let mut output = MockRenderStream::new();
        let terminal = output.clone();

        assert!(TerminalSession::acquire(&mut input, &mut output).is_err());
        assert!(!terminal.is_raw_mode());
    }

    #[test]
    fn accepted_input_should_end_on_new_line() {
        let (mut session, output) = mock_session(b"alice\r");
        let spec = InputSpec::new("Name: ", InputMode::Text);

        let result = session.prompt(&spec).unwrap();

        assert_eq!(result, SessionResult::Accepted("alice".to_string()));
        assert_eq!(output.screen_lines(), vec!["Name: alice", ""]);
        assert!(!output.is_raw_mode());
    }

    #[test]
    fn rejected_input_should_reuse_prompt_line() {
        let (mut session, output) = mock_session(b"\rbob\r");
        let spec = InputSpec::new("Name: ", InputMode::Text);

        let result = session.prompt(&spec).unwrap();

        assert_eq!(result, SessionResult::Accepted("bob".to_string()));
        assert_eq!(output.screen_lines(), vec!["Name: bob", ""]);
        assert!(output.get_output_string().contains("Input cannot be empty"));
        assert_eq!(output.raw_mode_enable_count(), 2);
    }

    #[test]
    fn keys_typed_during_error_display_should_be_discarded() {
        let mut input = MockByteStream::new(b"\r");
        input.push_typeahead(b"junk\r");
        input.push_bytes(b"bob\r");
        let output = MockRenderStream::new();
        let mut session = InputSession::new(input, output.clone()).with_config(quick_config());
        let spec = InputSpec::new("Name: ", InputMode::Text);

        let result = session.prompt(&spec).unwrap();

        assert_eq!(result, SessionResult::Accepted("bob".to_string()));
        assert_eq!(session.input().discard_count(), 1);
        assert_eq!(output.screen_lines(), vec!["Name: bob", ""]);
    }

    #[test]
    fn custom_error_message_should_replace_reason() {
        let (mut session, output) = mock_session(b"abc\r8080\r");
        let spec = InputSpec::new("Port: ", InputMode::Text)
            .with_min_length(4)
            .with_error_message("Four characters please");

        session.prompt(&spec).unwrap();

        let written = output.get_output_string();
        assert!(written.contains("Four characters please"));
        assert!(!written.contains("at least"));
    }

    #[test]
    fn interrupt_should_release_terminal() {
        let (mut session, output) = mock_session(b"ab\x03");
        let spec = InputSpec::new("Name: ", InputMode::Text);

        assert_eq!(session.prompt(&spec).unwrap(), SessionResult::Interrupted);
        assert!(!output.is_raw_mode());
        assert!(!session.input().is_capturing());
    }

    #[test]
    fn invalid_spec_should_fail_before_any_output() {
        let (mut session, output) = mock_session(b"x\r");
        let spec = InputSpec::new("Port: ", InputMode::Numeric).with_value_range(Some(9), Some(1));

        assert!(matches!(session.prompt(&spec), Err(InputError::InvalidSpec(_))));
        assert!(output.get_commands().is_empty());
    }

    #[test]
    fn exhausted_input_should_surface_terminal_error_and_release() {
        let (mut session, output) = mock_session(b"abc");
        let spec = InputSpec::new("Name: ", InputMode::Text);

        assert!(matches!(session.prompt(&spec), Err(InputError::Terminal(_))));
        assert!(!output.is_raw_mode());
    }

    #[test]
    fn colored_session_should_style_error_line() {
        let output = MockRenderStream::new();
        let mut session = InputSession::new(MockByteStream::new(b"\rx\r"), output.clone())
            .with_config(quick_config().with_color(true));
        let spec = InputSpec::new("Name: ", InputMode::Text);

        session.prompt(&spec).unwrap();

        assert!(output
            .get_output_string()
            .contains("\x1b[31m\x1b[1m\x1b[5m✗ Input cannot be empty\x1b[0m"));
    }

    #[test]
    fn session_result_should_serialize_with_status_tag() {
        let accepted = serde_json::to_string(&SessionResult::Accepted("8080".into())).unwrap();
        assert_eq!(accepted, r#"{"status":"accepted","value":"8080"}"#);
        let interrupted = serde_json::to_string(&SessionResult::Interrupted).unwrap();
        assert_eq!(interrupted, r#"{"status":"interrupted"}"#);
    }
}
