//! Route `tracing` output through a scrolling window.
//!
//! Run with: `cargo run --example logger`

use stagebuf::{Buffer, BufferConfig, Sink};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;

static LOG_BUFFER: OnceLock<Buffer> = OnceLock::new();

fn log_buffer() -> &'static Buffer {
    LOG_BUFFER.get_or_init(|| Buffer::new(Sink::stdout(), BufferConfig::new(5).with_prefix("log:")))
}

fn main() -> stagebuf::Result<()> {
    // The dispatcher must not log into the buffer it is draining.
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_writer(log_buffer)
        .with_filter(filter_fn(|meta| !meta.target().starts_with("stagebuf")));
    tracing_subscriber::registry().with(layer).init();

    for i in 0..20 {
        tracing::info!(step = i, "logging");
        thread::sleep(Duration::from_millis(50));
    }
    log_buffer().new_stage("successful logger")
}
