//! Window: bookkeeping for the rows currently owned by the live window.
//!
//! Rows are stored already wrapped, so `len()` is always the number of
//! physical rows a redraw would produce. Only the newest `max_rows` are
//! retained; that is all an overflow redraw ever needs.

use std::collections::VecDeque;

/// The live window of physical rows.
#[derive(Debug, Clone)]
pub struct Window {
    /// Wrapped rows, oldest first.
    lines: VecDeque<String>,
    /// Maximum number of rows the window may occupy on screen.
    max_rows: usize,
    /// Physical rows drawn on screen, which may exceed a lowered maximum
    /// until the next redraw or erase.
    drawn: usize,
}

impl Window {
    /// Create a window that shows at most `max_rows` rows.
    pub fn new(max_rows: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_rows),
            max_rows,
            drawn: 0,
        }
    }

    /// Maximum number of rows on screen.
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Change the maximum.
    ///
    /// Retained rows are trimmed to the new maximum at once. Rows already
    /// drawn stay on screen, and are still erased, until the next redraw.
    pub fn set_max_rows(&mut self, max_rows: usize) {
        self.max_rows = max_rows;
        self.trim();
    }

    /// Rows the window currently occupies, never more than the maximum.
    pub fn rows_onscreen(&self) -> usize {
        self.drawn.min(self.max_rows)
    }

    /// Physical rows drawn, i.e. how many an erase has to remove.
    pub const fn drawn_rows(&self) -> usize {
        self.drawn
    }

    /// Number of rows retained.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no rows are retained.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether `incoming` more rows would push the window past its maximum.
    pub const fn overflows(&self, incoming: usize) -> bool {
        self.drawn + incoming > self.max_rows
    }

    /// Append rows, discarding the oldest beyond the maximum.
    ///
    /// The drawn count grows by the number of appended rows, capped at the
    /// maximum: an overflowing push is always followed by a full redraw.
    pub fn push_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.lines.len();
        self.lines.extend(rows);
        let added = self.lines.len() - before;
        self.drawn = (self.drawn + added).min(self.max_rows);
        self.trim();
    }

    /// The rows a full redraw shows, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        let start = self.lines.len().saturating_sub(self.max_rows);
        self.lines.range(start..).map(String::as_str)
    }

    /// All retained rows, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Forget every row.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.drawn = 0;
    }

    fn trim(&mut self) {
        while self.lines.len() > self.max_rows {
            self.lines.pop_front();
        }
    }
}
