//! Source locations and byte spans
//!
//! The scanner tracks two independent coordinates for every token:
//!
//! - [`Location`] - a 1-based row:column pair plus an optional source name. The source name is
//!   an opaque label supplied by the caller for diagnostics; the scanner never interprets it.
//! - [`Span`] - a `[start, end)` pair of byte offsets into the caller-owned buffer. Token values
//!   are slices of that buffer, so no input text is copied while scanning.
//!
//! Errors outlive the scanner that produced them, so they carry a [`SourcePosition`] instead,
//! which owns its source name.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A row:column position in the input, with the optional source name it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location<'src> {
    pub row: usize,
    pub column: usize,
    pub source: Option<&'src str>,
}

impl<'src> Location<'src> {
    /// The location of the first byte of a buffer
    pub fn start(source: Option<&'src str>) -> Self {
        Self {
            row: 1,
            column: 1,
            source,
        }
    }

    /// Move past one byte: a newline starts the next row, anything else moves one column.
    pub fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = self.source {
            write!(f, "{}:", source)?;
        }
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Owned counterpart of [`Location`], used in errors
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub source: Option<String>,
    pub row: usize,
    pub column: usize,
}

impl From<Location<'_>> for SourcePosition {
    fn from(location: Location<'_>) -> Self {
        Self {
            source: location.source.map(str::to_owned),
            row: location.row,
            column: location.column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}:", source)?;
        }
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A `[start, end)` byte range into the scanned buffer
///
/// Invariant: `start <= end <= buffer.len()` for the buffer the span was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_rows_and_columns() {
        let mut location = Location::start(None);
        for byte in b"ab\nc" {
            location.advance(*byte);
        }
        assert_eq!((location.row, location.column), (2, 2));
    }

    #[test]
    fn test_display_includes_source_name() {
        let location = Location {
            row: 3,
            column: 7,
            source: Some("input.json"),
        };
        assert_eq!(location.to_string(), "input.json:3:7");
        assert_eq!(SourcePosition::from(location).to_string(), "input.json:3:7");
        assert_eq!(Location::start(None).to_string(), "1:1");
    }

    #[test]
    fn test_span_len() {
        let span = Span::from(4..9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.range(), 4..9);
        assert!(Span::new(3, 3).is_empty());
    }
}
