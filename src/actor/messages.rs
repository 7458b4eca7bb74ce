//! Message types for dispatcher communication.
//!
//! Producers send requests on one of three channels; synchronous requests
//! carry a one-slot reply channel the dispatcher answers once the message
//! has been drawn.

use super::renderer::RenderStats;
use crate::error::Result;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Completion signal for a synchronous request.
pub type Done = Sender<Result<()>>;

/// Create a one-slot completion channel.
pub(crate) fn done_channel() -> (Done, Receiver<Result<()>>) {
    bounded(1)
}

/// A message to print into the scrolling window.
#[derive(Debug)]
pub struct PrintRequest {
    /// Formatted text.
    pub text: String,
    /// Where to signal completion, if the caller waits.
    pub done: Option<Done>,
}

/// A request to finish the current stage.
#[derive(Debug)]
pub struct EraseRequest {
    /// Summary line; empty means a bare erase.
    pub summary: String,
    /// Where to signal completion.
    pub done: Done,
}

/// Queries answered by the dispatcher between messages.
#[derive(Debug)]
pub enum Query {
    /// Copy out the window state.
    Snapshot(Sender<WindowSnapshot>),
}

/// Observable state of a buffer between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    /// Rows currently drawn by the window.
    pub rows_onscreen: usize,
    /// Retained wrapped rows, oldest first.
    pub lines: Vec<String>,
    /// Configured window height.
    pub max_window: usize,
    /// Whether the sink is treated as a terminal.
    pub is_terminal: bool,
    /// Render statistics.
    pub stats: RenderStats,
}
