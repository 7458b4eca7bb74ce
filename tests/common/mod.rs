//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// An in-memory sink that can be inspected while a buffer owns a clone.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes()).unwrap()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Replay bytes through a VT100 emulator and return the screen rows.
///
/// LF is expanded to CR LF, as a tty in cooked mode would.
pub fn screen(bytes: &[u8], rows: u16, cols: u16) -> Vec<String> {
    let mut expanded = Vec::with_capacity(bytes.len() * 2);
    for &b in bytes {
        if b == b'\n' {
            expanded.push(b'\r');
        }
        expanded.push(b);
    }
    let mut parser = vt100::Parser::new(rows, cols, 0);
    parser.process(&expanded);
    parser
        .screen()
        .rows(0, cols)
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// The non-empty rows of a screen, top to bottom.
pub fn visible(bytes: &[u8], rows: u16, cols: u16) -> Vec<String> {
    screen(bytes, rows, cols)
        .into_iter()
        .filter(|row| !row.is_empty())
        .collect()
}
