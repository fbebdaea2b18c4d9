//! # Edit Buffer
//!
//! Single-line character buffer with an independent cursor.
//!
//! The cursor is a character index in `[0, len]`. Every operation keeps that
//! invariant and reports a [`BufferChange`] so the renderer can redraw only
//! the affected region.

/// What an operation did to the buffer, from the renderer's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferChange {
    /// Nothing to redraw
    Unchanged,
    /// A char was inserted left of the (already advanced) cursor
    Inserted,
    /// The char left of the cursor was removed and the cursor moved back
    DeletedBackward(char),
    /// The char under the cursor was removed; cursor unchanged
    DeletedForward(char),
    /// Only the cursor moved
    CursorMoved { from: usize, to: usize },
    /// Whole content replaced; cursor is at the end
    Replaced {
        previous: Vec<char>,
        previous_cursor: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Characters from the cursor to the end
    pub fn tail(&self) -> &[char] {
        &self.chars[self.cursor..]
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, ch: char) -> BufferChange {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        BufferChange::Inserted
    }

    pub fn delete_before_cursor(&mut self) -> BufferChange {
        if self.cursor == 0 {
            return BufferChange::Unchanged;
        }
        self.cursor -= 1;
        BufferChange::DeletedBackward(self.chars.remove(self.cursor))
    }

    pub fn delete_at_cursor(&mut self) -> BufferChange {
        if self.cursor >= self.chars.len() {
            return BufferChange::Unchanged;
        }
        BufferChange::DeletedForward(self.chars.remove(self.cursor))
    }

    pub fn move_left(&mut self) -> BufferChange {
        self.move_to(self.cursor.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> BufferChange {
        self.move_to((self.cursor + 1).min(self.chars.len()))
    }

    pub fn move_home(&mut self) -> BufferChange {
        self.move_to(0)
    }

    pub fn move_end(&mut self) -> BufferChange {
        self.move_to(self.chars.len())
    }

    /// Replace the content, leaving the cursor at the end
    pub fn replace_all(&mut self, text: &str) -> BufferChange {
        let previous_cursor = self.cursor;
        let previous = std::mem::replace(&mut self.chars, text.chars().collect());
        self.cursor = self.chars.len();
        BufferChange::Replaced {
            previous,
            previous_cursor,
        }
    }

    fn move_to(&mut self, to: usize) -> BufferChange {
        let from = self.cursor;
        if from == to {
            return BufferChange::Unchanged;
        }
        self.cursor = to;
        BufferChange::CursorMoved { from, to }
    }
}
