//! Renderer: the scrolling window state machine.
//!
//! The renderer owns the sink, the window and a reusable output buffer.
//! Each message is rendered into the output buffer and flushed in one
//! write. The dispatcher drives a renderer from its own thread; a
//! single-threaded program can also drive one directly.

use super::messages::WindowSnapshot;
use crate::buffer::BufferConfig;
use crate::error::{Error, Result};
use crate::style::Stage;
use crate::terminal::{OutputBuffer, Sink};
use crate::window::{wrap, Window};
use std::time::Instant;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Print messages rendered (including empty ones).
    pub prints: u64,
    /// Stage finalizations rendered.
    pub stages: u64,
    /// Prints that overflowed and redrew the window.
    pub redraws: u64,
    /// Total bytes written to the sink.
    pub bytes_written: u64,
    /// Average render time in microseconds.
    pub avg_render_us: u64,
    /// Last render time in microseconds.
    pub last_render_us: u64,
}

impl RenderStats {
    fn record(&mut self, start: Instant, bytes: usize) {
        self.bytes_written += bytes as u64;
        self.last_render_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        // Smoothed average
        if self.avg_render_us == 0 {
            self.avg_render_us = self.last_render_us;
        } else {
            self.avg_render_us = (self.avg_render_us * 15 + self.last_render_us) / 16;
        }
    }
}

/// Renders print and finalize messages to a sink.
#[derive(Debug)]
pub struct Renderer {
    /// Rows of the live window.
    window: Window,
    /// Destination.
    sink: Sink,
    /// Pre-allocated output buffer.
    output: OutputBuffer,
    /// Prefix, styles and window height.
    config: BufferConfig,
    /// Render statistics.
    stats: RenderStats,
}

impl Renderer {
    /// Create a renderer writing to `sink`.
    pub fn new(sink: Sink, config: BufferConfig) -> Self {
        Self {
            window: Window::new(config.max_window),
            sink,
            output: OutputBuffer::new(),
            config,
            stats: RenderStats::default(),
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A new window height applies at once; a lowered one trims the
    /// retained rows, while rows already drawn are erased by the next
    /// redraw or finalize.
    pub fn set_config(&mut self, config: BufferConfig) {
        if config.max_window > 0 {
            self.window.set_max_rows(config.max_window);
        }
        self.config = config;
    }

    /// Replace the sink.
    ///
    /// Rows drawn on the previous sink are forgotten: they cannot be
    /// erased through the new one.
    pub fn set_sink(&mut self, sink: Sink) {
        self.sink = sink;
        self.window.clear();
    }

    /// Whether the sink is treated as a terminal.
    pub const fn is_terminal(&self) -> bool {
        self.sink.is_terminal()
    }

    /// Rows currently drawn, capped at the window height.
    pub fn rows_onscreen(&self) -> usize {
        self.window.rows_onscreen()
    }

    /// The live window.
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Render statistics.
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Copy out the observable state.
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            rows_onscreen: self.window.rows_onscreen(),
            lines: self.window.lines().map(str::to_owned).collect(),
            max_window: self.config.max_window,
            is_terminal: self.sink.is_terminal(),
            stats: self.stats,
        }
    }

    fn check_initialized(&mut self) -> Result<()> {
        if self.config.max_window == 0 {
            return Err(Error::NotInitialized);
        }
        self.window.set_max_rows(self.config.max_window);
        Ok(())
    }

    const fn colored(&self) -> bool {
        self.config.color && self.sink.is_terminal()
    }

    /// Columns left for text once the prefix is written.
    fn text_columns(&mut self) -> Result<usize> {
        let cols = self.sink.columns().map_err(Error::WidthQuery)?;
        let prefix = if self.config.prefix.is_empty() {
            0
        } else {
            self.config.prefix.width() + 1
        };
        Ok(cols.saturating_sub(prefix).max(1))
    }

    /// Print one message into the scrolling window.
    ///
    /// Surrounding whitespace is trimmed; an empty message draws nothing.
    /// When the new rows would overflow the window on a terminal, the
    /// window is erased and its newest rows redrawn.
    ///
    /// # Errors
    ///
    /// [`Error::NotInitialized`] if the window height is zero, otherwise a
    /// width query or sink write failure.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.check_initialized()?;
        let start = Instant::now();
        self.stats.prints += 1;

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let rows = wrap::rows(text, self.text_columns()?);
        let count = rows.len();
        let colored = self.colored();
        let style = self.config.style_for(Stage::Printer);
        let prefix = self.config.prefix.as_str();
        let overflow = self.sink.is_terminal() && self.window.overflows(count);

        self.output.clear();
        if overflow {
            self.output.erase_lines(self.window.drawn_rows());
            self.window.push_rows(rows);
            for row in self.window.visible() {
                style.write_line(&mut self.output, prefix, row, colored);
            }
            self.stats.redraws += 1;
        } else {
            for row in &rows {
                style.write_line(&mut self.output, prefix, row, colored);
            }
            self.window.push_rows(rows);
        }

        self.output.flush_to(self.sink.writer())?;
        self.stats.record(start, self.output.len());
        trace!(
            rows = count,
            overflow,
            onscreen = self.window.rows_onscreen(),
            "print rendered"
        );
        Ok(())
    }

    /// Finish the current stage.
    ///
    /// Erases the live window (on a terminal), forgets its rows and writes
    /// `summary` in the stage style unless it is empty.
    ///
    /// # Errors
    ///
    /// [`Error::NotInitialized`] if the window height is zero, otherwise a
    /// sink write failure.
    pub fn finalize(&mut self, summary: &str) -> Result<()> {
        self.check_initialized()?;
        let start = Instant::now();
        self.stats.stages += 1;

        let erased = if self.sink.is_terminal() {
            self.window.drawn_rows()
        } else {
            0
        };

        self.output.clear();
        self.output.erase_lines(erased);
        self.window.clear();
        if !summary.is_empty() {
            let colored = self.colored();
            self.config
                .style_for(Stage::Finalizer)
                .write_line(&mut self.output, "", summary, colored);
        }

        self.output.flush_to(self.sink.writer())?;
        self.stats.record(start, self.output.len());
        trace!(erased, summary = !summary.is_empty(), "stage finalized");
        Ok(())
    }
}
