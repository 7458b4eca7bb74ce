//! Error types for buffer operations.

use thiserror::Error;

/// Errors surfaced by a [`Buffer`](crate::Buffer) or a [`Renderer`](crate::Renderer).
#[derive(Error, Debug)]
pub enum Error {
    /// The window height is zero; nothing can be printed or erased.
    #[error("buffer has not been initialized: max window is 0")]
    NotInitialized,

    /// The dispatcher has exited, either cancelled or after a fatal error.
    #[error("buffer is closed")]
    Closed,

    /// Writing to the sink failed.
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal width could not be determined.
    #[error("terminal width query failed: {0}")]
    WidthQuery(#[source] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error ends the dispatcher.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::WidthQuery(_))
    }
}
