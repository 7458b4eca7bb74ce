//! Terminal module: everything that touches the destination stream.
//!
//! - [`OutputBuffer`]: per-message byte accumulator and cursor primitives
//! - [`Sink`]: the owned writer, its terminal flag and width source
//! - [`WidthSource`]: the width query used for wrapping

mod output;
mod sink;
pub mod size;

pub use output::OutputBuffer;
pub use sink::{Sink, NO_COLOR, NO_TERMINAL_CHECK};
pub(crate) use sink::env_flag;
pub use size::{CachedWidth, FixedWidth, TerminalWidth, Unbounded, WidthSource};
