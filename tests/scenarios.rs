//! End-to-end scenarios against the public buffer API.

mod common;

use common::{visible, Capture};
use stagebuf::{Buffer, BufferConfig, Color, Error, FixedWidth, Modifiers, Sink, Style, WidthSource};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

const ERASE_ROW: &str = "\x1b[1A\x1b[2K";

fn terminal(max_window: usize, width: usize) -> (Buffer, Capture) {
    let capture = Capture::default();
    let sink = Sink::terminal(capture.clone()).with_width(FixedWidth(width));
    let config = BufferConfig::new(max_window).with_color(true);
    (Buffer::new(sink, config), capture)
}

#[test]
fn test_prints_within_window() {
    let (buffer, capture) = terminal(5, 80);
    for text in ["a", "b", "c"] {
        buffer.println(text).unwrap();
    }
    let snapshot = buffer.snapshot().unwrap();

    assert_eq!(capture.text(), "a\nb\nc\n");
    assert!(!capture.text().contains("\x1b[1A"));
    assert_eq!(snapshot.rows_onscreen, 3);
}

#[test]
fn test_overflow_redraws_newest_rows() {
    let (buffer, capture) = terminal(3, 80);
    for text in ["1", "2", "3", "4"] {
        buffer.println(text).unwrap();
    }
    let snapshot = buffer.snapshot().unwrap();

    let expected = format!("1\n2\n3\n{}2\n3\n4\n", ERASE_ROW.repeat(3));
    assert_eq!(capture.text(), expected);
    assert_eq!(snapshot.rows_onscreen, 3);
    assert_eq!(visible(&capture.bytes(), 10, 40), vec!["2", "3", "4"]);
}

#[test]
fn test_new_stage_collapses_window() {
    let (buffer, capture) = terminal(3, 80);
    for text in ["1", "2", "3", "4"] {
        buffer.println(text).unwrap();
    }
    buffer.snapshot().unwrap();
    capture.clear();
    buffer.set_stage_style(Style::default().with_modifiers(Modifiers::BOLD));

    buffer.new_stage("done").unwrap();
    let snapshot = buffer.snapshot().unwrap();

    assert_eq!(
        capture.text(),
        format!("{}\x1b[1mdone\x1b[0m\n", ERASE_ROW.repeat(3))
    );
    assert_eq!(snapshot.rows_onscreen, 0);
    assert!(snapshot.lines.is_empty());
}

#[test]
fn test_stage_summary_replaces_window_on_screen() {
    let (buffer, capture) = terminal(3, 80);
    for i in 0..7 {
        stagebuf::printf!(buffer => "step {i}").unwrap();
    }
    stagebuf::new_stage!(buffer => "stage {} finished!", 0).unwrap();
    buffer.println("next").unwrap();
    buffer.snapshot().unwrap();

    assert_eq!(
        visible(&capture.bytes(), 10, 40),
        vec!["stage 0 finished!", "next"]
    );
}

#[test]
fn test_erase_empty_window_writes_nothing() {
    let (buffer, capture) = terminal(5, 80);
    buffer.erase_buffer().unwrap();
    assert_eq!(capture.text(), "");
    assert_eq!(buffer.snapshot().unwrap().rows_onscreen, 0);
}

#[test]
fn test_long_lines_wrap_into_rows() {
    let (buffer, capture) = terminal(5, 10);
    buffer.println("abcdefghijklmnopqrstuvwxy").unwrap();
    let snapshot = buffer.snapshot().unwrap();
    assert_eq!(snapshot.rows_onscreen, 3);
    assert_eq!(snapshot.lines, vec!["abcdefghij", "klmnopqrst", "uvwxy"]);

    buffer.println("x").unwrap();
    assert_eq!(buffer.snapshot().unwrap().rows_onscreen, 4);
    assert_eq!(capture.text(), "abcdefghij\nklmnopqrst\nuvwxy\nx\n");
}

#[test]
fn test_wrapped_overflow_erases_physical_rows() {
    let (buffer, capture) = terminal(3, 4);
    buffer.println("ab").unwrap();
    buffer.println("cdefgh").unwrap();
    buffer.snapshot().unwrap();
    capture.clear();

    buffer.println("ij").unwrap();
    buffer.snapshot().unwrap();
    assert_eq!(
        capture.text(),
        format!("{}cdef\ngh\nij\n", ERASE_ROW.repeat(3))
    );
}

#[test]
fn test_prefix_and_printer_style() {
    let (buffer, capture) = terminal(5, 80);
    buffer.set_prefix("=>");
    buffer.set_printer_style(Style::fg(Color::Rgb { r: 9, g: 8, b: 7 }));
    buffer.println("styled").unwrap();
    buffer.snapshot().unwrap();

    assert_eq!(capture.text(), "\x1b[38;2;9;8;7m=> styled\x1b[0m\n");
}

#[test]
fn test_non_terminal_appends_only() {
    let capture = Capture::default();
    let buffer = Buffer::new(
        Sink::new(capture.clone()),
        BufferConfig::new(2).with_prefix("->"),
    );
    for i in 0..5 {
        stagebuf::printf!(buffer => "line {i}").unwrap();
    }
    buffer.new_stage("summary").unwrap();

    assert_eq!(
        capture.text(),
        "-> line 0\n-> line 1\n-> line 2\n-> line 3\n-> line 4\nsummary\n"
    );
    assert!(!capture.text().contains('\x1b'));
}

#[test]
fn test_logger_writes_through_adapter() {
    let (buffer, capture) = terminal(2, 80);
    let mut writer = &buffer;
    for i in 0..3 {
        // A logger hands over one complete record per write.
        writer.write_all(format!("{i}: logging\n").as_bytes()).unwrap();
    }
    buffer.new_stage("successful logger").unwrap();

    assert_eq!(visible(&capture.bytes(), 10, 40), vec!["successful logger"]);
}

#[test]
fn test_prints_from_one_producer_stay_in_order() {
    let (buffer, capture) = terminal(50, 80);
    for i in 0..40 {
        stagebuf::printf!(buffer => "{i}").unwrap();
    }
    buffer.new_stage("end").unwrap();

    let expected: String = (0..40).map(|i| format!("{i}\n")).collect();
    assert_eq!(
        capture.text(),
        format!("{expected}{}end\n", ERASE_ROW.repeat(40))
    );
}

#[test]
fn test_five_thousand_concurrent_producers() {
    const PRODUCERS: usize = 5_000;
    const MAX_WINDOW: usize = 15;

    let (buffer, _capture) = terminal(MAX_WINDOW, 80);
    let peak = AtomicUsize::new(0);
    let running = AtomicBool::new(true);

    thread::scope(|scope| {
        scope.spawn(|| {
            while running.load(Ordering::Relaxed) {
                peak.fetch_max(buffer.in_flight(), Ordering::Relaxed);
                thread::yield_now();
            }
        });

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|i| {
                let buffer = &buffer;
                scope.spawn(move || stagebuf::printf!(buffer => "hello from {i}").unwrap())
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }
        running.store(false, Ordering::Relaxed);
    });

    let snapshot = buffer.snapshot().unwrap();
    assert_eq!(snapshot.rows_onscreen, MAX_WINDOW);
    assert_eq!(snapshot.lines.len(), MAX_WINDOW);
    assert_eq!(snapshot.stats.prints, PRODUCERS as u64);
    assert!(peak.load(Ordering::Relaxed) <= MAX_WINDOW);

    let inputs: HashSet<String> = (0..PRODUCERS)
        .map(|i| format!("hello from {i}"))
        .collect();
    let shown: HashSet<&String> = snapshot.lines.iter().collect();
    assert_eq!(shown.len(), MAX_WINDOW);
    assert!(snapshot.lines.iter().all(|line| inputs.contains(line)));
}

#[test]
fn test_cancelled_buffer_reports_closed() {
    let (buffer, _capture) = terminal(3, 80);
    buffer.println("before").unwrap();
    buffer.shutdown();

    assert!(matches!(buffer.println("after"), Err(stagebuf::Error::Closed)));
    assert!(matches!(buffer.erase_buffer(), Err(stagebuf::Error::Closed)));
}

#[test]
fn test_shared_token_cancels_every_buffer() {
    let token = stagebuf::CancelToken::new();
    let first = Buffer::with_token(
        Sink::new(Capture::default()),
        BufferConfig::new(3),
        token.clone(),
    );
    let second = Buffer::with_token(
        Sink::new(Capture::default()),
        BufferConfig::new(3),
        token.clone(),
    );
    first.println_sync("one").unwrap();
    second.println_sync("two").unwrap();

    token.cancel();
    assert!(first.println_sync("late").is_err());
    assert!(second.println_sync("late").is_err());
}

#[test]
fn test_synchronous_config_waits_for_draw() {
    let capture = Capture::default();
    let sink = Sink::terminal(capture.clone()).with_width(FixedWidth(80));
    let buffer = Buffer::new(sink, BufferConfig::new(4).synchronous(true));
    buffer.println("drawn").unwrap();
    // No snapshot round trip: the print itself waited for the write.
    assert_eq!(capture.text(), "drawn\n");
}

#[test]
fn test_shrinking_window_keeps_snapshot_bounded() {
    let (buffer, capture) = terminal(5, 80);
    for text in ["1", "2", "3", "4"] {
        buffer.println_sync(text).unwrap();
    }

    buffer.set_max_window(2);
    let snapshot = buffer.snapshot().unwrap();
    assert_eq!(snapshot.max_window, 2);
    assert!(snapshot.rows_onscreen <= snapshot.max_window);
    assert_eq!(snapshot.lines, vec!["3", "4"]);

    buffer.println_sync("5").unwrap();
    buffer.new_stage("done").unwrap();
    assert_eq!(visible(&capture.bytes(), 10, 40), vec!["done"]);
}

struct NoWidth;

impl WidthSource for NoWidth {
    fn columns(&mut self) -> io::Result<usize> {
        Err(io::Error::other("no terminal attached"))
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_width_query_failure_closes_buffer() {
    let sink = Sink::terminal(Capture::default()).with_width(NoWidth);
    let buffer = Buffer::new(sink, BufferConfig::new(3));

    assert!(matches!(buffer.println_sync("first"), Err(Error::WidthQuery(_))));
    assert!(matches!(buffer.println_sync("second"), Err(Error::Closed)));
    assert!(matches!(buffer.new_stage("summary"), Err(Error::Closed)));
    assert!(buffer.is_closed());
}

#[test]
fn test_sink_write_failure_closes_buffer() {
    let sink = Sink::terminal(BrokenPipe).with_width(FixedWidth(80));
    let buffer = Buffer::new(sink, BufferConfig::new(3));

    match buffer.println_sync("first") {
        Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected a sink error, got {other:?}"),
    }
    assert!(matches!(buffer.println_sync("second"), Err(Error::Closed)));
    assert!(matches!(buffer.snapshot(), Err(Error::Closed)));
}
