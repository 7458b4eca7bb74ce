//! Width sources: how the renderer learns the terminal column count.
//!
//! The renderer queries the width before every print so that a resized
//! terminal is picked up without a SIGWINCH handler.

use std::io;
use std::time::{Duration, Instant};

/// Supplies the current terminal width in columns.
pub trait WidthSource: Send {
    /// Query the current width.
    ///
    /// # Errors
    ///
    /// Returns an error if the width cannot be determined.
    fn columns(&mut self) -> io::Result<usize>;
}

/// Queries the controlling terminal through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWidth {
    fallback: Option<usize>,
}

impl TerminalWidth {
    /// Strict query: any failure is reported.
    pub const fn new() -> Self {
        Self { fallback: None }
    }

    /// Answer `cols` when the terminal cannot be queried.
    ///
    /// Used for emulated terminals that are not a tty.
    pub const fn with_fallback(cols: usize) -> Self {
        Self {
            fallback: Some(cols),
        }
    }
}

impl WidthSource for TerminalWidth {
    fn columns(&mut self) -> io::Result<usize> {
        match crossterm::terminal::size() {
            Ok((cols, _rows)) if cols > 0 => Ok(usize::from(cols)),
            Ok(_) => self
                .fallback
                .ok_or_else(|| io::Error::other("terminal reported zero columns")),
            Err(err) => self.fallback.ok_or(err),
        }
    }
}

/// A constant width, for tests and known-size destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub usize);

impl WidthSource for FixedWidth {
    fn columns(&mut self) -> io::Result<usize> {
        Ok(self.0.max(1))
    }
}

/// No wrapping at all; used for pipes and files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl WidthSource for Unbounded {
    fn columns(&mut self) -> io::Result<usize> {
        Ok(usize::MAX)
    }
}

/// Caches another source's answer for a short time.
pub struct CachedWidth<S> {
    inner: S,
    ttl: Duration,
    cached: Option<(Instant, usize)>,
}

impl<S: WidthSource> CachedWidth<S> {
    /// Wrap `inner`, reusing its answer for `ttl`.
    pub const fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: None,
        }
    }
}

impl<S: WidthSource> WidthSource for CachedWidth<S> {
    fn columns(&mut self) -> io::Result<usize> {
        let now = Instant::now();
        if let Some((at, cols)) = self.cached {
            if now.duration_since(at) < self.ttl {
                return Ok(cols);
            }
        }
        let cols = self.inner.columns()?;
        self.cached = Some((now, cols));
        Ok(cols)
    }
}

impl<S> std::fmt::Debug for CachedWidth<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedWidth")
            .field("ttl", &self.ttl)
            .field("cached", &self.cached.map(|(_, cols)| cols))
            .finish_non_exhaustive()
    }
}
