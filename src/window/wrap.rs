//! Wrapping: splitting a message into physical terminal rows.
//!
//! Chunking walks graphemes and measures display width, so a chunk never
//! spans more than `width` columns. For ASCII text every chunk except the
//! last is exactly `width` bytes.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Split `text` into pieces of at most `width` display columns.
///
/// Empty text yields no chunks. A single grapheme wider than `width`
/// gets a chunk of its own.
pub fn chunk(text: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut chunks = Vec::with_capacity(text.len() / width + 1);
    let mut start = 0;
    let mut cols = 0;

    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if cols + w > width && offset > start {
            chunks.push(&text[start..offset]);
            start = offset;
            cols = 0;
        }
        cols += w;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Turn a message into the rows it occupies on screen.
///
/// Embedded newlines start a new row; an interior empty line is still a
/// row. Empty text occupies nothing.
pub fn rows(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let pieces = chunk(line, width);
        if pieces.is_empty() {
            rows.push(String::new());
        } else {
            rows.extend(pieces.into_iter().map(str::to_owned));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_exact_widths() {
        let text = "abcdefghijklmnopqrstuvwxy";
        let pieces = chunk(text, 10);
        assert_eq!(pieces, vec!["abcdefghij", "klmnopqrst", "uvwxy"]);
    }

    #[test]
    fn test_chunk_empty() {
        assert!(chunk("", 10).is_empty());
        assert!(rows("", 10).is_empty());
    }

    #[test]
    fn test_chunk_short_text() {
        assert_eq!(chunk("hi", 80), vec!["hi"]);
    }

    #[test]
    fn test_chunk_wide_graphemes() {
        // Each CJK character takes two columns.
        let pieces = chunk("日本語テキスト", 5);
        assert_eq!(pieces, vec!["日本", "語テ", "キス", "ト"]);
        for piece in pieces {
            assert!(UnicodeWidthStr::width(piece) <= 5);
        }
    }

    #[test]
    fn test_chunk_grapheme_wider_than_width() {
        assert_eq!(chunk("日x", 1), vec!["日", "x"]);
    }

    #[test]
    fn test_chunk_keeps_combining_marks_together() {
        let text = "e\u{301}e\u{301}";
        assert_eq!(chunk(text, 1), vec!["e\u{301}", "e\u{301}"]);
    }

    #[test]
    fn test_rows_split_newlines() {
        assert_eq!(rows("one\r\n\ntwo", 80), vec!["one", "", "two"]);
    }

    #[test]
    fn test_rows_wrap_each_line() {
        assert_eq!(rows("abcd\nef", 3), vec!["abc", "d", "ef"]);
    }
}
