//! Sink: the destination a buffer owns once it is set.

use super::size::{TerminalWidth, Unbounded, WidthSource};
use crossterm::tty::IsTty;
use std::io::{self, Write};

/// Environment variable that forces terminal behavior on any sink.
pub const NO_TERMINAL_CHECK: &str = "NO_TERMINAL_CHECK";

/// Environment variable that disables style escapes.
pub const NO_COLOR: &str = "NO_COLOR";

/// Width assumed for a forced terminal that cannot be queried.
const FORCED_COLUMNS: usize = 80;

/// Whether `var` is set to a non-empty value.
pub(crate) fn env_flag(var: &str) -> bool {
    std::env::var_os(var).is_some_and(|v| !v.is_empty())
}

/// An output destination plus what is known about it.
///
/// When `is_terminal` is false the renderer only appends: no cursor
/// movement or row clearing is ever written.
pub struct Sink {
    writer: Box<dyn Write + Send>,
    is_terminal: bool,
    width: Box<dyn WidthSource>,
}

impl Sink {
    /// A plain, non-terminal destination (pipe, file, in-memory).
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            is_terminal: false,
            width: Box::new(Unbounded),
        }
    }

    /// A destination treated as a terminal regardless of probing.
    pub fn terminal<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            is_terminal: true,
            width: Box::new(TerminalWidth::new()),
        }
    }

    /// Standard output, probed for a tty.
    ///
    /// `NO_TERMINAL_CHECK` promotes a non-tty stdout to a terminal.
    pub fn stdout() -> Self {
        let tty = io::stdout().is_tty();
        Self::probed(io::stdout(), tty)
    }

    /// Standard error, probed for a tty.
    pub fn stderr() -> Self {
        let tty = io::stderr().is_tty();
        Self::probed(io::stderr(), tty)
    }

    fn probed<W: Write + Send + 'static>(writer: W, tty: bool) -> Self {
        if tty {
            Self::terminal(writer)
        } else if env_flag(NO_TERMINAL_CHECK) {
            Self::terminal(writer).with_width(TerminalWidth::with_fallback(FORCED_COLUMNS))
        } else {
            Self::new(writer)
        }
    }

    /// Replace the width source.
    #[must_use]
    pub fn with_width<S: WidthSource + 'static>(mut self, width: S) -> Self {
        self.width = Box::new(width);
        self
    }

    /// Whether erase primitives are live.
    pub const fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Current width in columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the width source fails.
    pub fn columns(&mut self) -> io::Result<usize> {
        self.width.columns()
    }

    /// The underlying writer.
    pub fn writer(&mut self) -> &mut (dyn Write + Send) {
        self.writer.as_mut()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("is_terminal", &self.is_terminal)
            .finish_non_exhaustive()
    }
}
