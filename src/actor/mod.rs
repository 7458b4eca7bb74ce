//! Actor Model: Message-passing concurrency for the output buffer.
//!
//! Every buffer owns one dispatcher thread. Producers never touch window
//! state; they hand messages to the dispatcher, which renders them one at
//! a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ticket   ┌─────────────┐
//! │  Producer 1  │ ────────▶ │  print_ch   │ ──┐
//! └──────────────┘           └─────────────┘   │    ┌──────────────┐     ┌──────┐
//! ┌──────────────┐           ┌─────────────┐   ├──▶ │  Dispatcher  │ ──▶ │ Sink │
//! │  Producer N  │ ────────▶ │  erase_ch   │ ──┘    │  (Renderer)  │     └──────┘
//! └──────────────┘           └─────────────┘        └──────────────┘
//!        ▲                                                 │
//!        └──────────────────── done ───────────────────────┘
//! ```

mod cancel;
mod dispatcher;
mod messages;
mod renderer;

pub use cancel::CancelToken;
pub(crate) use dispatcher::{Dispatcher, Inbound, Shared};
pub(crate) use messages::{done_channel, EraseRequest, PrintRequest, Query};
pub use messages::WindowSnapshot;
pub use renderer::{RenderStats, Renderer};
