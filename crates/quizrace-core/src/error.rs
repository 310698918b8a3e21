//! Input stream error types.
//!
//! These represent failures of the answer source while a session is being
//! asked. All of them are fatal to the session: a line read cannot be
//! repeated without losing or duplicating what the user typed.

use std::io;

use thiserror::Error;

/// Errors raised by the input arbiter.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input stream ended before a reply was read.
    #[error("input stream closed before an answer was read")]
    Closed,

    /// Reading from the input stream failed.
    #[error("failed to read answer: {0}")]
    Io(#[from] io::Error),

    /// Writing a prompt or notification failed.
    #[error("failed to write to the console: {0}")]
    Output(#[source] io::Error),

    /// The background read task went away without handing the stream back.
    #[error("input reader was lost")]
    ReaderLost,

    /// A read abandoned by an earlier timeout still owns the stream.
    #[error("an abandoned read is still pending; reclaim the input before asking again")]
    OrphanedRead,
}

impl InputError {
    /// Returns `true` if the stream simply ran out of input.
    pub fn is_end_of_input(&self) -> bool {
        match self {
            InputError::Closed => true,
            InputError::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}
