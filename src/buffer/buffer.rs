//! Buffer: the public, thread-safe face of a scrolling window.
//!
//! Every operation is a message to the buffer's dispatcher thread. Prints
//! take a ticket first, so at most `max_window` prints are ever waiting on
//! the dispatcher no matter how many threads are producing.

use super::config::BufferConfig;
use crate::actor::{
    done_channel, CancelToken, Dispatcher, EraseRequest, Inbound, PrintRequest, Query, Renderer,
    Shared, WindowSnapshot,
};
use crate::error::{Error, Result};
use crate::style::Style;
use crate::terminal::Sink;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Bounds the number of prints in flight between producers and dispatcher.
#[derive(Debug)]
struct Tickets {
    acquire: Sender<()>,
    release: Receiver<()>,
}

/// A held ticket; released on drop.
struct Ticket<'a>(&'a Receiver<()>);

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let _ = self.0.try_recv();
    }
}

impl Tickets {
    fn new(capacity: usize) -> Self {
        let (acquire, release) = bounded(capacity.max(1));
        Self { acquire, release }
    }

    fn acquire(&self) -> Result<Ticket<'_>> {
        self.acquire.send(()).map_err(|_| Error::Closed)?;
        Ok(Ticket(&self.release))
    }

    fn in_flight(&self) -> usize {
        self.acquire.len()
    }
}

/// A scrolling terminal output buffer.
///
/// Prints scroll inside a window of at most `max_window` rows; a new stage
/// collapses the window into an optional summary line.
///
/// # Example
///
/// ```no_run
/// use stagebuf::{Buffer, BufferConfig, Sink};
///
/// let buffer = Buffer::new(Sink::stdout(), BufferConfig::new(5).with_prefix("=>"));
/// for i in 0..20 {
///     stagebuf::printf!(buffer => "step {i}")?;
/// }
/// buffer.new_stage("stage one finished!")?;
/// # Ok::<(), stagebuf::Error>(())
/// ```
pub struct Buffer {
    shared: Arc<Shared>,
    print_tx: Sender<PrintRequest>,
    erase_tx: Sender<EraseRequest>,
    query_tx: Sender<Query>,
    tickets: Tickets,
    stop: CancelToken,
    dispatcher: Mutex<Option<Dispatcher>>,
}

impl Buffer {
    /// Create a buffer writing to `sink` and start its dispatcher.
    pub fn new(sink: Sink, config: BufferConfig) -> Self {
        Self::spawn(sink, config, None)
    }

    /// Like [`new`](Self::new), but the dispatcher also stops when `token`
    /// is cancelled. One token may govern many buffers.
    pub fn with_token(sink: Sink, config: BufferConfig, token: CancelToken) -> Self {
        Self::spawn(sink, config, Some(token))
    }

    /// A buffer on standard output.
    pub fn stdout(config: BufferConfig) -> Self {
        Self::new(Sink::stdout(), config)
    }

    fn spawn(sink: Sink, config: BufferConfig, parent: Option<CancelToken>) -> Self {
        let (print_tx, print) = bounded(0);
        let (erase_tx, erase) = bounded(0);
        let (query_tx, query) = bounded(0);
        let tickets = Tickets::new(config.max_window);
        let shared = Arc::new(Shared::new(config.clone()));
        let stop = CancelToken::new();

        let dispatcher = Dispatcher::spawn(
            Renderer::new(sink, config),
            Arc::clone(&shared),
            Inbound {
                print,
                erase,
                query,
            },
            stop.clone(),
            parent,
        );

        Self {
            shared,
            print_tx,
            erase_tx,
            query_tx,
            tickets,
            stop,
            dispatcher: Mutex::new(Some(dispatcher)),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        if self.max_window() == 0 {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn submit(&self, text: String, sync: bool) -> Result<()> {
        self.ensure_open()?;
        let _ticket = self.tickets.acquire()?;

        if !sync {
            return self
                .print_tx
                .send(PrintRequest { text, done: None })
                .map_err(|_| Error::Closed);
        }

        let (done, wait) = done_channel();
        self.print_tx
            .send(PrintRequest {
                text,
                done: Some(done),
            })
            .map_err(|_| Error::Closed)?;
        wait.recv().map_err(|_| Error::Closed)?
    }

    fn finish_stage(&self, summary: String) -> Result<()> {
        self.ensure_open()?;
        let (done, wait) = done_channel();
        self.erase_tx
            .send(EraseRequest { summary, done })
            .map_err(|_| Error::Closed)?;
        wait.recv().map_err(|_| Error::Closed)?
    }

    fn synchronous(&self) -> bool {
        self.shared.read(|config| config.synchronous)
    }

    /// Print a message into the scrolling window.
    ///
    /// Returns once the dispatcher has taken the message; on a
    /// synchronous buffer, once it has been drawn.
    pub fn println(&self, message: impl fmt::Display) -> Result<()> {
        self.submit(message.to_string(), self.synchronous())
    }

    /// Print pre-formatted arguments; see [`printf!`](crate::printf).
    pub fn print_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.submit(fmt::format(args), self.synchronous())
    }

    /// Print and wait until the message has been drawn.
    pub fn println_sync(&self, message: impl fmt::Display) -> Result<()> {
        self.submit(message.to_string(), true)
    }

    /// Print pre-formatted arguments and wait until drawn.
    pub fn print_fmt_sync(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.submit(fmt::format(args), true)
    }

    /// Finish the current stage: erase the window and write `summary`.
    ///
    /// Blocks until the summary has been written. Every print whose send
    /// completed before this call is drawn (and erased) first.
    pub fn new_stage(&self, summary: impl fmt::Display) -> Result<()> {
        self.finish_stage(summary.to_string())
    }

    /// Finish the current stage with pre-formatted arguments; see
    /// [`new_stage!`](crate::new_stage).
    pub fn new_stage_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.finish_stage(fmt::format(args))
    }

    /// Erase the window without writing a summary.
    pub fn erase_buffer(&self) -> Result<()> {
        self.finish_stage(String::new())
    }

    /// The window state as of every completed print.
    pub fn snapshot(&self) -> Result<WindowSnapshot> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        let (reply, wait) = bounded(1);
        self.query_tx
            .send(Query::Snapshot(reply))
            .map_err(|_| Error::Closed)?;
        wait.recv().map_err(|_| Error::Closed)
    }

    /// Configured window height.
    pub fn max_window(&self) -> usize {
        self.shared.read(|config| config.max_window)
    }

    /// Change the window height; applies from the next message.
    ///
    /// The ticket count stays at the height the buffer was created with.
    pub fn set_max_window(&self, max_window: usize) {
        self.shared.update(|config| config.max_window = max_window);
    }

    /// Change the row prefix; empty disables it.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.shared.update(|config| config.prefix = prefix);
    }

    /// Change the style of scrolling rows.
    pub fn set_printer_style(&self, style: Style) {
        self.shared.update(|config| config.printer_style = style);
    }

    /// Change the style of stage summaries.
    pub fn set_stage_style(&self, style: Style) {
        self.shared.update(|config| config.stage_style = style);
    }

    /// Make every print wait until drawn, or stop doing so.
    pub fn set_synchronous(&self, synchronous: bool) {
        self.shared.update(|config| config.synchronous = synchronous);
    }

    /// Replace the destination; applies from the next message.
    pub fn set_sink(&self, sink: Sink) {
        self.shared.replace_sink(sink);
    }

    /// Prints currently holding a ticket.
    pub fn in_flight(&self) -> usize {
        self.tickets.in_flight()
    }

    /// Stop the dispatcher. Later operations fail with [`Error::Closed`].
    pub fn cancel(&self) {
        self.stop.cancel();
    }

    /// Whether the dispatcher has stopped or been told to.
    pub fn is_closed(&self) -> bool {
        self.stop.is_cancelled() || self.shared.is_closed()
    }

    /// Cancel and wait for the dispatcher thread to exit.
    pub fn shutdown(&self) {
        self.cancel();
        let dispatcher = self
            .dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(dispatcher) = dispatcher {
            dispatcher.join();
        }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("max_window", &self.max_window())
            .field("in_flight", &self.in_flight())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Byte-sink adapter so a buffer can back a logger or any `io::Write` user.
///
/// Each write becomes one print with trailing whitespace removed. Writes
/// always report the full length: a failing progress display is not
/// something the writer's caller can act on.
impl Write for &Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        if let Err(err) = self.submit(text.trim_end().to_owned(), self.synchronous()) {
            trace!(error = %err, "write dropped");
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
