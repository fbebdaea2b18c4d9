//! Event types produced by the key decoder

/// Discrete editing command decoded from raw terminal bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Printable character to insert at the cursor
    Insert(char),
    /// Remove the character left of the cursor (backspace)
    DeleteBackward,
    /// Remove the character under the cursor (Delete key)
    DeleteForward,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    /// Enter: finish editing
    Submit,
    /// Ctrl-C or a delivered SIGINT
    Interrupt,
}

/// Observable decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Normal,
    /// An `ESC` has been read and its continuation is still being collected
    EscapePending,
    /// A multi-byte UTF-8 character is partially read
    Utf8Pending,
}
