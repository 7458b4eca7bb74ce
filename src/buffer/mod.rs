//! Buffer module: the public entry points.
//!
//! - [`Buffer`]: a scrolling window with its own dispatcher thread
//! - [`BufferConfig`]: window height, prefix and styles
//! - [`standard`]: the process-wide buffer on standard output

#[allow(clippy::module_inception)]
mod buffer;
mod config;
mod standard;

pub use buffer::Buffer;
pub use config::{BufferConfig, DEFAULT_MAX_WINDOW};
pub use standard::{cancel, erase_buffer, new_stage, new_stage_fmt, print_fmt, println, standard};
