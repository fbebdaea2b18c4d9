//! Public error type of the input engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// The request itself is malformed; nothing was written to the terminal
    #[error("invalid input parameters: {0}")]
    InvalidSpec(String),

    #[error("standard input is not an interactive terminal")]
    NotATerminal,

    /// Raw-mode switching or terminal I/O failed
    #[error("terminal error: {0:#}")]
    Terminal(#[from] anyhow::Error),
}

impl InputError {
    /// Process exit code the command-line front end uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            InputError::InvalidSpec(_) => 2,
            InputError::NotATerminal | InputError::Terminal(_) => 1,
        }
    }
}
