//! Cursor primitives
//!
//! The cursor owns the scanning position: a byte offset into the buffer and the row:column
//! location of that offset. It only ever moves forward, one byte at a time, through
//! [Cursor::advance_one], so location tracking has a single point of truth.
//!
//! Delimiter searches come in two flavours. [Cursor::find] is a plain substring search, used
//! for comment closers. [Cursor::find_skipping_comments] also recognizes comment openers at
//! every step and skips whole comment regions, so a closing delimiter hidden inside a comment
//! is not matched and a comment may sit inside a string or field search.

use super::lexicon::{is_sentinel, CommentDelimiter, Lexicon};
use super::location::{Location, Span};

pub struct Cursor<'src, 'lex> {
    buffer: &'src [u8],
    offset: usize,
    location: Location<'src>,
    lexicon: &'lex Lexicon,
}

impl<'src, 'lex> Cursor<'src, 'lex> {
    pub fn new(buffer: &'src [u8], lexicon: &'lex Lexicon, source: Option<&'src str>) -> Self {
        Self {
            buffer,
            offset: 0,
            location: Location::start(source),
            lexicon,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn location(&self) -> Location<'src> {
        self.location
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Byte under the cursor, `None` once the buffer is exhausted
    pub fn current(&self) -> Option<u8> {
        self.buffer.get(self.offset).copied()
    }

    /// Slice of the buffer covered by `span`
    pub fn slice(&self, span: Span) -> &'src [u8] {
        &self.buffer[span.range()]
    }

    /// Consume exactly one byte, updating the location. No-op at the end of the buffer.
    pub fn advance_one(&mut self) {
        if let Some(byte) = self.current() {
            self.location.advance(byte);
            self.offset += 1;
        }
    }

    /// Bounds-checked prefix test at the cursor
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.buffer
            .get(self.offset..)
            .map_or(false, |rest| rest.starts_with(needle))
    }

    /// Consume `delimiter`, which the caller has already matched at the cursor
    pub fn skip(&mut self, delimiter: &[u8]) {
        debug_assert!(self.starts_with(delimiter));
        for _ in 0..delimiter.len() {
            self.advance_one();
        }
    }

    /// Skip configured whitespace and sentinel bytes
    ///
    /// A NUL (or `0xFF`) byte before the end of the buffer does not end the input; it is
    /// skipped like whitespace. Only the buffer length ends scanning.
    pub fn skip_whitespace_and_sentinels(&mut self) {
        while let Some(byte) = self.current() {
            if !(self.lexicon.is_whitespace(byte) || is_sentinel(byte)) {
                break;
            }
            self.advance_one();
        }
    }

    /// First configured comment whose opener matches at the cursor
    pub fn comment_at_cursor(&self) -> Option<&'lex CommentDelimiter> {
        let lexicon: &'lex Lexicon = self.lexicon;
        lexicon
            .comments()
            .iter()
            .find(|comment| self.starts_with(comment.open.as_bytes()))
    }

    /// Whether the byte under the cursor ends a word/number candidate
    pub fn at_word_boundary(&self) -> bool {
        let Some(byte) = self.current() else {
            return true;
        };
        let lexicon = self.lexicon;
        lexicon.symbol_index(byte).is_some()
            || lexicon.is_whitespace(byte)
            || is_sentinel(byte)
            || lexicon.string_index(byte).is_some()
            || self.comment_at_cursor().is_some()
            || lexicon
                .fields()
                .iter()
                .any(|field| self.starts_with(field.prefix.as_bytes()))
    }

    /// Advance until `delimiter` matches at the cursor
    ///
    /// Returns `false` if the buffer is exhausted first.
    pub fn find(&mut self, delimiter: &[u8]) -> bool {
        while !self.starts_with(delimiter) {
            if self.is_at_end() {
                return false;
            }
            self.advance_one();
        }
        true
    }

    /// Advance until `delimiter` matches at the cursor, skipping comment regions on the way
    ///
    /// A comment met during the search is skipped whole: its closer is located with the plain
    /// [Cursor::find], so comment bodies are opaque. On exhaustion the error names the closer
    /// that was still being looked for: `delimiter` itself, or the closer of an unterminated
    /// comment.
    pub fn find_skipping_comments<'d>(&mut self, delimiter: &'d [u8]) -> Result<(), &'d [u8]>
    where
        'lex: 'd,
    {
        loop {
            if self.starts_with(delimiter) {
                return Ok(());
            }
            if let Some(comment) = self.comment_at_cursor() {
                let close = comment.close.as_bytes();
                self.skip(comment.open.as_bytes());
                if !self.find(close) {
                    return Err(close);
                }
                self.skip(close);
                continue;
            }
            if self.is_at_end() {
                return Err(delimiter);
            }
            self.advance_one();
        }
    }
}
