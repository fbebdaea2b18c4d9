//! # Line Renderer
//!
//! Turns [`BufferChange`]s into the smallest cursor-relative screen update.
//! The renderer never reads the terminal: it assumes the on-screen cursor sits
//! at the column matching the buffer cursor before each change and leaves it
//! there afterwards.

use super::message::{style_or_plain, MessageStyler, HINT_ATTRIBUTES};
use crate::input::io::{columns, RenderStream};
use crate::input::models::{BufferChange, EditBuffer, InputMode, InputSpec};
use anyhow::Result;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy)]
pub struct LineRenderer {
    /// Glyph drawn instead of every real character, if any
    mask: Option<char>,
}

impl LineRenderer {
    pub fn new(mode: InputMode, mask_glyph: char) -> Self {
        Self {
            mask: mode.is_masked().then_some(mask_glyph),
        }
    }

    /// Draw the prompt text and, when a default applies, its hint
    pub fn render_prompt<O: RenderStream + ?Sized>(
        &self,
        output: &mut O,
        spec: &InputSpec,
        styler: &dyn MessageStyler,
    ) -> Result<()> {
        output.write_all(spec.prompt.as_bytes())?;
        if let Some(hint) = self.hint(spec) {
            let styled = style_or_plain(styler, &hint, HINT_ATTRIBUTES);
            output.write_all(styled.as_bytes())?;
            output.write_all(b" ")?;
        }
        Ok(())
    }

    fn hint(&self, spec: &InputSpec) -> Option<String> {
        if spec.mode == InputMode::YesNo {
            let choices = match spec.yes_no_default() {
                Some(true) => "[Y/n]",
                Some(false) => "[y/N]",
                None => "[y/n]",
            };
            return Some(choices.to_string());
        }

        let default = spec.effective_default()?;
        let shown = match self.mask {
            Some(glyph) => glyph.to_string().repeat(default.chars().count()),
            None => default.to_string(),
        };
        Some(format!("[{shown}]"))
    }

    /// Draw the whole buffer from its start; the cursor ends at buffer end
    pub fn render_buffer<O: RenderStream + ?Sized>(
        &self,
        output: &mut O,
        buffer: &EditBuffer,
    ) -> Result<()> {
        output.write_all(self.glyphs(buffer.chars()).as_bytes())?;
        output.move_left(columns(self.width(buffer.tail())))
    }

    /// Echo literal text (already-decided answers such as `Y`)
    pub fn echo<O: RenderStream + ?Sized>(&self, output: &mut O, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        output.write_all(self.glyphs(&chars).as_bytes())?;
        Ok(())
    }

    /// Redraw only what `change` touched
    pub fn render_change<O: RenderStream + ?Sized>(
        &self,
        output: &mut O,
        buffer: &EditBuffer,
        change: &BufferChange,
    ) -> Result<()> {
        let chars = buffer.chars();
        let cursor = buffer.cursor();
        let tail = buffer.tail();

        match change {
            BufferChange::Unchanged => {}
            BufferChange::Inserted => {
                output.write_all(self.glyphs(&chars[cursor - 1..]).as_bytes())?;
                output.move_left(columns(self.width(tail)))?;
            }
            BufferChange::DeletedBackward(removed) => {
                output.move_left(columns(self.width(&[*removed])))?;
                self.redraw_tail(output, tail)?;
            }
            BufferChange::DeletedForward(_) => {
                self.redraw_tail(output, tail)?;
            }
            BufferChange::CursorMoved { from, to } => {
                if to < from {
                    output.move_left(columns(self.width(&chars[*to..*from])))?;
                } else {
                    output.move_right(columns(self.width(&chars[*from..*to])))?;
                }
            }
            BufferChange::Replaced {
                previous,
                previous_cursor,
            } => {
                output.move_left(columns(self.width(&previous[..*previous_cursor])))?;
                output.write_all(self.glyphs(chars).as_bytes())?;
                output.clear_to_end_of_line()?;
            }
        }
        Ok(())
    }

    fn redraw_tail<O: RenderStream + ?Sized>(&self, output: &mut O, tail: &[char]) -> Result<()> {
        output.write_all(self.glyphs(tail).as_bytes())?;
        output.clear_to_end_of_line()?;
        output.move_left(columns(self.width(tail)))
    }

    fn glyphs(&self, chars: &[char]) -> String {
        match self.mask {
            Some(glyph) => std::iter::repeat(glyph).take(chars.len()).collect(),
            None => chars.iter().collect(),
        }
    }

    /// Terminal columns occupied by `chars` as rendered
    fn width(&self, chars: &[char]) -> usize {
        match self.mask {
            Some(glyph) => UnicodeWidthChar::width(glyph).unwrap_or(1) * chars.len(),
            None => chars
                .iter()
                .map(|ch| UnicodeWidthChar::width(*ch).unwrap_or(1))
                .sum(),
        }
    }
}
