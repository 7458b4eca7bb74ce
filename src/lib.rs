//! # Stagebuf
//!
//! A scrolling, stage-aware output buffer for command-line tools.
//!
//! Work that proceeds in stages produces a lot of chatter that is useful
//! while a stage runs and noise once it is done. A [`Buffer`] shows only
//! the newest lines of that chatter, redrawing in place, and collapses
//! them into a one-line summary when the stage finishes.
//!
//! ## Core Concepts
//!
//! - **Window**: at most `max_window` physical rows, long lines wrapped
//! - **Dispatcher**: one thread per buffer renders every message in order
//! - **Tickets**: at most `max_window` prints are in flight at once
//! - **Graceful degradation**: on a non-terminal sink nothing is erased
//!
//! ## Example
//!
//! ```rust,no_run
//! use stagebuf::{Buffer, BufferConfig, Sink};
//!
//! let buffer = Buffer::new(Sink::stdout(), BufferConfig::new(5));
//! for file in ["a.rs", "b.rs", "c.rs"] {
//!     stagebuf::printf!(buffer => "compiling {file}")?;
//! }
//! stagebuf::new_stage!(buffer => "compiled {} files", 3)?;
//!
//! // The standard buffer on stdout:
//! stagebuf::printf!("hello from the standard buffer")?;
//! # Ok::<(), stagebuf::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

/// Format and print into a buffer's scrolling window.
///
/// `printf!(buffer => "fmt", args...)` prints on `buffer`;
/// `printf!("fmt", args...)` prints on the [standard buffer](standard).
#[macro_export]
macro_rules! printf {
    ($buffer:expr => $($arg:tt)*) => {
        $buffer.print_fmt(::std::format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::print_fmt(::std::format_args!($($arg)*))
    };
}

/// Format a summary and finish the current stage.
///
/// `new_stage!(buffer => "fmt", args...)` or, for the standard buffer,
/// `new_stage!("fmt", args...)`.
#[macro_export]
macro_rules! new_stage {
    ($buffer:expr => $($arg:tt)*) => {
        $buffer.new_stage_fmt(::std::format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        $crate::new_stage_fmt(::std::format_args!($($arg)*))
    };
}

pub mod actor;
pub mod buffer;
pub mod error;
pub mod style;
pub mod terminal;
pub mod window;

// Re-exports for convenience
pub use actor::{CancelToken, RenderStats, Renderer, WindowSnapshot};
pub use buffer::{
    cancel, erase_buffer, new_stage, new_stage_fmt, print_fmt, println, standard, Buffer,
    BufferConfig, DEFAULT_MAX_WINDOW,
};
pub use error::{Error, Result};
pub use style::{Modifiers, Stage, Style};
pub use terminal::{CachedWidth, FixedWidth, Sink, TerminalWidth, Unbounded, WidthSource};
pub use window::Window;

/// Crossterm's color type, used in [`Style`].
pub use crossterm::style::Color;
