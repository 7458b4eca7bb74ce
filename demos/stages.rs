//! Run a few noisy stages and collapse each into a summary line.
//!
//! Run with: `cargo run --example stages`

use stagebuf::{Buffer, BufferConfig, Color, Modifiers, Sink, Style};
use std::thread;
use std::time::Duration;

const GREETINGS: [&str; 4] = ["hello john", "hello ringo", "hello george", "hello paul"];

fn main() -> stagebuf::Result<()> {
    let (_, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let config = BufferConfig::new(usize::from(rows.saturating_sub(5)).max(1))
        .with_prefix("=>")
        .with_printer_style(Style::fg(Color::DarkGrey))
        .with_stage_style(Style::fg(Color::Green).with_modifiers(Modifiers::BOLD));
    let buffer = Buffer::new(Sink::stdout(), config);

    for stage in 0..5 {
        for i in 0..50 {
            stagebuf::printf!(buffer => "{} ({i})", GREETINGS[i % GREETINGS.len()])?;
            thread::sleep(Duration::from_millis(20));
        }
        stagebuf::new_stage!(buffer => "=>=> stage {stage} finished!")?;
    }

    // The standard buffer needs no setup.
    stagebuf::printf!("all stages finished")?;
    Ok(())
}
