//! Dispatcher: the single consumer that serializes every render.
//!
//! Producers on any thread hand messages over zero-capacity channels, so
//! a completed send means the dispatcher has taken the message and will
//! draw it before looking at anything else. All window state lives on
//! the dispatcher thread; configuration changes are published through
//! [`Shared`] and picked up at the start of the next message.

use super::cancel::CancelToken;
use super::messages::{Done, EraseRequest, PrintRequest, Query};
use super::renderer::Renderer;
use crate::buffer::BufferConfig;
use crate::error::Result;
use crate::terminal::Sink;
use crossbeam_channel::{never, select, Receiver};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// State shared between producers and the dispatcher.
#[derive(Debug)]
pub(crate) struct Shared {
    config: RwLock<BufferConfig>,
    generation: AtomicU64,
    pending_sink: Mutex<Option<Sink>>,
    closed: AtomicBool,
}

impl Shared {
    pub(crate) fn new(config: BufferConfig) -> Self {
        Self {
            config: RwLock::new(config),
            generation: AtomicU64::new(0),
            pending_sink: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// A copy of the current configuration.
    pub(crate) fn config(&self) -> BufferConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read one field without copying the whole configuration.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&BufferConfig) -> T) -> T {
        f(&self.config.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Mutate the configuration and publish the change.
    pub(crate) fn update(&self, f: impl FnOnce(&mut BufferConfig)) {
        f(&mut self.config.write().unwrap_or_else(PoisonError::into_inner));
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Queue a sink replacement for the next message.
    pub(crate) fn replace_sink(&self, sink: Sink) {
        *self
            .pending_sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    fn take_sink(&self) -> Option<Sink> {
        self.pending_sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Receiving ends of the dispatcher's inbound channels.
#[derive(Debug)]
pub(crate) struct Inbound {
    pub(crate) print: Receiver<PrintRequest>,
    pub(crate) erase: Receiver<EraseRequest>,
    pub(crate) query: Receiver<Query>,
}

/// Handle to a running dispatcher thread.
#[derive(Debug)]
pub struct Dispatcher {
    /// Handle to the dispatcher thread.
    handle: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Spawn the dispatcher thread.
    ///
    /// The loop exits when `stop` or `parent` is cancelled, or after a
    /// fatal render error.
    #[allow(clippy::missing_panics_doc)]
    pub(crate) fn spawn(
        renderer: Renderer,
        shared: Arc<Shared>,
        inbound: Inbound,
        stop: CancelToken,
        parent: Option<CancelToken>,
    ) -> Self {
        let handle = thread::Builder::new()
            .name("stagebuf-dispatch".to_string())
            .spawn(move || {
                let mut worker = Worker {
                    renderer,
                    seen: shared.generation.load(Ordering::Acquire),
                    shared,
                    stop,
                    parent,
                };
                worker.run_loop(&inbound);
                worker.shared.closed.store(true, Ordering::Release);
                debug!("dispatcher stopped");
            })
            .expect("Failed to spawn dispatcher thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Wait for the dispatcher thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct Worker {
    renderer: Renderer,
    shared: Arc<Shared>,
    /// Configuration generation the renderer was last synced to.
    seen: u64,
    stop: CancelToken,
    parent: Option<CancelToken>,
}

impl Worker {
    fn cancelled(&self) -> bool {
        self.stop.is_cancelled() || self.parent.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Apply configuration published since the last message.
    fn sync(&mut self) {
        if let Some(sink) = self.shared.take_sink() {
            debug!(is_terminal = sink.is_terminal(), "sink replaced");
            self.renderer.set_sink(sink);
        }
        let generation = self.shared.generation.load(Ordering::Acquire);
        if generation != self.seen {
            self.seen = generation;
            self.renderer.set_config(self.shared.config());
        }
    }

    /// Main dispatch loop.
    fn run_loop(&mut self, inbound: &Inbound) {
        let stop = self.stop.signal();
        let parent = self.parent.as_ref().map_or_else(never, CancelToken::signal);
        debug!(
            max_window = self.renderer.config().max_window,
            is_terminal = self.renderer.is_terminal(),
            "dispatcher started"
        );

        loop {
            let running = select! {
                recv(inbound.print) -> request => match request {
                    Ok(request) => self.handle_print(request),
                    Err(_) => false,
                },
                recv(inbound.erase) -> request => match request {
                    Ok(request) => self.handle_erase(request),
                    Err(_) => false,
                },
                recv(inbound.query) -> query => match query {
                    Ok(query) => self.handle_query(query),
                    Err(_) => false,
                },
                recv(stop) -> _ => {
                    debug!("dispatcher cancelled");
                    false
                },
                recv(parent) -> _ => {
                    debug!("dispatcher cancelled by parent token");
                    false
                },
            };
            if !running {
                break;
            }
        }
    }

    fn handle_print(&mut self, request: PrintRequest) -> bool {
        if self.cancelled() {
            return false;
        }
        self.sync();
        let result = self.renderer.print(&request.text);
        Self::complete(result, request.done)
    }

    fn handle_erase(&mut self, request: EraseRequest) -> bool {
        if self.cancelled() {
            return false;
        }
        self.sync();
        let result = self.renderer.finalize(&request.summary);
        Self::complete(result, Some(request.done))
    }

    fn handle_query(&mut self, query: Query) -> bool {
        if self.cancelled() {
            return false;
        }
        self.sync();
        match query {
            Query::Snapshot(reply) => {
                let _ = reply.send(self.renderer.snapshot());
            }
        }
        true
    }

    /// Report a message's outcome. Returns `false` if the loop must stop.
    fn complete(result: Result<()>, done: Option<Done>) -> bool {
        let fatal = match &result {
            Err(err) if err.is_fatal() => {
                error!(error = %err, "render failed, dispatcher stopping");
                true
            }
            Err(err) if done.is_none() => {
                warn!(error = %err, "dropped print");
                false
            }
            _ => false,
        };
        if let Some(done) = done {
            let _ = done.send(result);
        }
        !fatal
    }
}
