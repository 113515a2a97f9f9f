//! Fixed-offset field spans.
//!
//! TLE fields live at fixed character columns. Spans are measured in
//! characters, so a stray multi-byte character shifts nothing and never
//! causes a slicing panic.

use serde::Serialize;
use std::ops::Range;

/// A named half-open character range `[start, end)` within a TLE line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        FieldSpan { name, start, end }
    }

    /// Number of characters covered by the span.
    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True if the span lies entirely inside a line of `line_len` characters.
    pub fn fits(&self, line_len: usize) -> bool {
        self.end <= line_len
    }

    /// Extract the raw (untrimmed) text covered by the span.
    ///
    /// Returns `None` when the line is too short to contain the span.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = char_to_byte(line, self.start)?;
        let end = char_to_byte(line, self.end)?;
        line.get(start..end)
    }

    /// Extract and trim surrounding whitespace.
    pub fn extract_trimmed<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.extract(line).map(str::trim)
    }
}

impl std::fmt::Display for FieldSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{},{})", self.name, self.start, self.end)
    }
}

/// Byte offset of the `idx`-th character; `idx == char count` maps to `len()`.
fn char_to_byte(line: &str, idx: usize) -> Option<usize> {
    if idx == 0 {
        return Some(0);
    }
    match line.char_indices().nth(idx) {
        Some((byte, _)) => Some(byte),
        None if line.chars().count() == idx => Some(line.len()),
        None => None,
    }
}

/// Character count of a line, the unit every span and width is measured in.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ascii() {
        let span = FieldSpan::new("x", 2, 7);
        assert_eq!(span.extract("1 00011U 59001A"), Some("00011"));
        assert_eq!(span.width(), 5);
    }

    #[test]
    fn test_extract_to_end_of_line() {
        let span = FieldSpan::new("tail", 3, 5);
        assert_eq!(span.extract("abcde"), Some("de"));
    }

    #[test]
    fn test_extract_out_of_range() {
        let span = FieldSpan::new("x", 2, 7);
        assert_eq!(span.extract("1 000"), None);
        assert!(!span.fits(5));
        assert!(span.fits(7));
    }

    #[test]
    fn test_extract_counts_characters_not_bytes() {
        // 'é' is two bytes; the span still addresses characters.
        let span = FieldSpan::new("x", 2, 4);
        assert_eq!(span.extract("éabcd"), Some("bc"));
        assert_eq!(char_len("éabcd"), 5);
    }

    #[test]
    fn test_extract_trimmed() {
        let span = FieldSpan::new("x", 0, 6);
        assert_eq!(span.extract_trimmed("  42  xyz"), Some("42"));
    }
}
