//! Window module: the on-screen rows and how messages become rows.
//!
//! - [`Window`]: the retained rows and the on-screen row count
//! - [`wrap`]: chunking messages to the terminal width

#[allow(clippy::module_inception)]
mod window;
pub mod wrap;

pub use window::Window;
