//! The standard buffer: one process-wide buffer on standard output.
//!
//! It is synchronous: every print returns only after it has been drawn,
//! so it can stand in for ordinary print statements. It is created on
//! first use and runs until [`cancel`] is called.

use super::{Buffer, BufferConfig};
use crate::error::Result;
use crate::terminal::Sink;
use std::fmt;
use std::sync::OnceLock;

static STANDARD: OnceLock<Buffer> = OnceLock::new();

/// The process-wide buffer bound to standard output.
pub fn standard() -> &'static Buffer {
    STANDARD.get_or_init(|| Buffer::new(Sink::stdout(), BufferConfig::default().synchronous(true)))
}

/// Print a message on the standard buffer and wait until it is drawn.
pub fn println(message: impl fmt::Display) -> Result<()> {
    standard().println(message)
}

/// Print pre-formatted arguments on the standard buffer; see
/// [`printf!`](crate::printf).
pub fn print_fmt(args: fmt::Arguments<'_>) -> Result<()> {
    standard().print_fmt(args)
}

/// Finish the standard buffer's current stage.
pub fn new_stage(summary: impl fmt::Display) -> Result<()> {
    standard().new_stage(summary)
}

/// Finish the standard buffer's stage with pre-formatted arguments.
pub fn new_stage_fmt(args: fmt::Arguments<'_>) -> Result<()> {
    standard().new_stage_fmt(args)
}

/// Erase the standard buffer's window.
pub fn erase_buffer() -> Result<()> {
    standard().erase_buffer()
}

/// Stop the standard buffer's dispatcher for the rest of the process.
pub fn cancel() {
    standard().cancel();
}
