//! # Key Decoder
//!
//! Byte-level state machine that turns raw-mode terminal input into
//! [`EditCommand`]s.
//!
//! ```text
//!            ESC                       2nd byte (unrecognised)
//!  Normal ─────────▶ EscapePending ────────────────────────────▶ Normal (swallowed)
//!    ▲                    │  │
//!    │   [D [C [H [F OH OF │  │ [<params>... <final>
//!    └────────────────────┘  └──────────────────────────────────▶ Normal
//!    │                          │ more than 8 bytes
//!    │                          └──────▶ Discard ──── <final> ───▶ Normal
//!    │
//!    │  lead byte >= 0xC2           continuation bytes complete
//!    └──────────────▶ Utf8Pending ─────────────────────────────▶ Normal (Insert)
//! ```
//!
//! The decoder never waits on its own. The line editor polls with a short
//! timeout while [`KeyDecoder::is_escape_pending`] is true and calls
//! [`KeyDecoder::timeout`] when nothing arrives, so a lone `ESC` is a no-op.

use super::types::{DecoderState, EditCommand};

const ESC: u8 = 0x1b;
const CTRL_A: u8 = 0x01;
const CTRL_C: u8 = 0x03;
const CTRL_E: u8 = 0x05;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Longest escape continuation collected before the rest is discarded
const MAX_ESCAPE_LEN: usize = 8;

// ECMA-48 CSI byte classes: parameters and intermediates, then one final byte
const CSI_PARAM_FIRST: u8 = 0x20;
const CSI_PARAM_LAST: u8 = 0x3f;
const CSI_FINAL_FIRST: u8 = 0x40;
const CSI_FINAL_LAST: u8 = 0x7e;

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Normal,
    /// Bytes received after `ESC`
    Escape(Vec<u8>),
    /// Overlong CSI: drop bytes until its final byte
    Discard,
    Utf8 { bytes: Vec<u8>, expected: usize },
}

enum EscapeStep {
    Pending,
    Discard,
    Done(Option<EditCommand>),
}

/// Decoder for raw terminal input
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: State,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
        }
    }

    pub fn state(&self) -> DecoderState {
        match self.state {
            State::Normal => DecoderState::Normal,
            State::Escape(_) | State::Discard => DecoderState::EscapePending,
            State::Utf8 { .. } => DecoderState::Utf8Pending,
        }
    }

    /// Whether the caller should wait (bounded) for more escape bytes
    pub fn is_escape_pending(&self) -> bool {
        matches!(self.state, State::Escape(_) | State::Discard)
    }

    /// Feed one byte, returning a command once one is complete
    pub fn feed(&mut self, byte: u8) -> Option<EditCommand> {
        // Ctrl-C wins regardless of what is pending
        if byte == CTRL_C {
            self.state = State::Normal;
            return Some(EditCommand::Interrupt);
        }

        match std::mem::replace(&mut self.state, State::Normal) {
            State::Normal => self.feed_normal(byte),
            State::Escape(sequence) => self.feed_escape(sequence, byte),
            State::Discard => self.feed_discard(byte),
            State::Utf8 { bytes, expected } => self.feed_utf8(bytes, expected, byte),
        }
    }

    /// No further byte arrived in time: drop whatever escape was pending
    pub fn timeout(&mut self) {
        if self.is_escape_pending() {
            tracing::trace!("pending escape sequence timed out");
            self.state = State::Normal;
        }
    }

    fn feed_normal(&mut self, byte: u8) -> Option<EditCommand> {
        match byte {
            ESC => {
                self.state = State::Escape(Vec::with_capacity(2));
                None
            }
            DELETE | BACKSPACE => Some(EditCommand::DeleteBackward),
            b'\r' | b'\n' => Some(EditCommand::Submit),
            CTRL_A => Some(EditCommand::MoveHome),
            CTRL_E => Some(EditCommand::MoveEnd),
            0x20..=0x7e => Some(EditCommand::Insert(char::from(byte))),
            0xc2..=0xdf => self.start_utf8(byte, 2),
            0xe0..=0xef => self.start_utf8(byte, 3),
            0xf0..=0xf4 => self.start_utf8(byte, 4),
            _ => None,
        }
    }

    fn start_utf8(&mut self, lead: u8, expected: usize) -> Option<EditCommand> {
        self.state = State::Utf8 {
            bytes: vec![lead],
            expected,
        };
        None
    }

    fn feed_escape(&mut self, mut sequence: Vec<u8>, byte: u8) -> Option<EditCommand> {
        if byte == ESC {
            // a fresh escape supersedes the incomplete one
            self.state = State::Escape(Vec::with_capacity(2));
            return None;
        }

        sequence.push(byte);
        let step = match sequence.as_slice() {
            [_] => EscapeStep::Pending,
            [b'[', b'D'] => EscapeStep::Done(Some(EditCommand::MoveLeft)),
            [b'[', b'C'] => EscapeStep::Done(Some(EditCommand::MoveRight)),
            [b'[', b'H'] | [b'O', b'H'] => EscapeStep::Done(Some(EditCommand::MoveHome)),
            [b'[', b'F'] | [b'O', b'F'] => EscapeStep::Done(Some(EditCommand::MoveEnd)),
            [b'[', body @ ..] => match byte {
                CSI_FINAL_FIRST..=CSI_FINAL_LAST => {
                    EscapeStep::Done(Self::csi_with_parameters(body))
                }
                CSI_PARAM_FIRST..=CSI_PARAM_LAST if sequence.len() >= MAX_ESCAPE_LEN => {
                    tracing::trace!("escape sequence exceeded {} bytes", MAX_ESCAPE_LEN);
                    EscapeStep::Discard
                }
                CSI_PARAM_FIRST..=CSI_PARAM_LAST => EscapeStep::Pending,
                _ => EscapeStep::Done(None),
            },
            _ => EscapeStep::Done(None),
        };

        match step {
            EscapeStep::Pending => {
                self.state = State::Escape(sequence);
                None
            }
            EscapeStep::Discard => {
                self.state = State::Discard;
                None
            }
            EscapeStep::Done(command) => command,
        }
    }

    /// Swallow the tail of an overlong CSI up to its final byte
    fn feed_discard(&mut self, byte: u8) -> Option<EditCommand> {
        match byte {
            ESC => self.state = State::Escape(Vec::with_capacity(2)),
            CSI_PARAM_FIRST..=CSI_PARAM_LAST => self.state = State::Discard,
            _ => {}
        }
        None
    }

    fn csi_with_parameters(body: &[u8]) -> Option<EditCommand> {
        match body {
            b"1~" | b"7~" => Some(EditCommand::MoveHome),
            b"4~" | b"8~" => Some(EditCommand::MoveEnd),
            b"3~" => Some(EditCommand::DeleteForward),
            _ => None,
        }
    }

    fn feed_utf8(&mut self, mut bytes: Vec<u8>, expected: usize, byte: u8) -> Option<EditCommand> {
        if byte & 0xc0 != 0x80 {
            // malformed: drop the partial character and start over
            return self.feed_normal(byte);
        }

        bytes.push(byte);
        if bytes.len() < expected {
            self.state = State::Utf8 { bytes, expected };
            return None;
        }

        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .filter(|ch| !ch.is_control())
            .map(EditCommand::Insert)
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}
