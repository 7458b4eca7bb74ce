//! Style module: per-stage styling of written rows.

#[allow(clippy::module_inception)]
mod style;

pub use style::{Modifiers, Stage, Style};
