//! `OutputBuffer`: Single-syscall output buffer for one rendered message.

use crossterm::{
    cursor::{MoveDown, MoveTo, MoveUp},
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Pre-allocated buffer for building a message's output.
///
/// Everything a message produces (erases, redrawn rows, summary) is
/// accumulated here, then flushed in a single `write()` syscall so the
/// terminal never shows a half-erased window.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical window (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Terminate the current row.
    #[inline]
    pub fn newline(&mut self) {
        self.data.push(b'\n');
    }

    /// Move the cursor up `rows` rows (`CSI n A`).
    #[inline]
    pub fn cursor_up(&mut self, rows: u16) {
        let _ = queue!(self.data, MoveUp(rows));
    }

    /// Move the cursor down `rows` rows (`CSI n B`).
    #[inline]
    pub fn cursor_down(&mut self, rows: u16) {
        let _ = queue!(self.data, MoveDown(rows));
    }

    /// Clear the entire current row (`CSI 2 K`).
    #[inline]
    pub fn clear_row(&mut self) {
        let _ = queue!(self.data, Clear(ClearType::CurrentLine));
    }

    /// Move the cursor to column 1 of the 1-indexed `row` (`CSI n ; 1 H`).
    #[inline]
    pub fn goto_row(&mut self, row: u16) {
        let _ = queue!(self.data, MoveTo(0, row.saturating_sub(1)));
    }

    /// Blank the `rows` rows above the cursor, leaving it on the topmost.
    pub fn erase_lines(&mut self, rows: usize) {
        for _ in 0..rows {
            self.cursor_up(1);
            self.clear_row();
        }
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
