//! Token production
//!
//! [Scanner::next_token] turns the cursor position into the next token. Each call runs the
//! same fixed priority, committing to the first tier that matches:
//!
//!     1. Trim       whitespace, sentinel bytes and whole comment regions, repeatedly
//!     2. String     the byte under the cursor opens a configured string
//!     3. Symbol     the byte under the cursor is a configured symbol
//!     4. Field      the cursor starts with a configured field prefix
//!     5. Word       greedily take bytes up to the next boundary, then classify the candidate
//!                   as a configured word, a number (Integer, Float, Hex, Bin), or Unknown
//!
//! A token is only handed out once it is complete, so stopping between calls never leaves a
//! half-consumed token behind. Errors are final: the cursor is not left at a restartable
//! position, and the [Iterator] adapter stops after yielding the first one.

use super::cursor::Cursor;
use super::error::{Construct, ScanError};
use super::lexicon::{Lexicon, UnknownPolicy};
use super::location::{Location, SourcePosition, Span};
use super::numbers;
use super::token::{Token, TokenId, TokenKind, TokenPattern, PRESERVED_UNKNOWN};

/// Stateful scanner over a borrowed buffer
pub struct Scanner<'src, 'lex> {
    buffer: &'src [u8],
    source: Option<&'src str>,
    lexicon: &'lex Lexicon,
    cursor: Cursor<'src, 'lex>,
    halted: bool,
}

impl<'src, 'lex> Scanner<'src, 'lex> {
    pub fn new(buffer: &'src [u8], lexicon: &'lex Lexicon) -> Self {
        Self {
            buffer,
            source: None,
            lexicon,
            cursor: Cursor::new(buffer, lexicon, None),
            halted: false,
        }
    }

    /// Attach a source name that every token location will carry
    pub fn with_source_name(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self.reset();
        self
    }

    pub fn lexicon(&self) -> &'lex Lexicon {
        self.lexicon
    }

    pub fn buffer(&self) -> &'src [u8] {
        self.buffer
    }

    /// Current row:column of the cursor
    pub fn location(&self) -> Location<'src> {
        self.cursor.location()
    }

    /// Restart scanning from the beginning of the buffer
    pub fn reset(&mut self) {
        self.cursor = Cursor::new(self.buffer, self.lexicon, self.source);
        self.halted = false;
    }

    /// Produce the next token, or `None` at the end of input
    pub fn next_token(&mut self) -> Result<Option<Token<'src>>, ScanError> {
        if !self.trim()? {
            return Ok(None);
        }
        let start = self.cursor.location();

        if let Some(token) = self.scan_string(start)? {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_symbol(start) {
            return Ok(Some(token));
        }
        if let Some(token) = self.scan_field(start)? {
            return Ok(Some(token));
        }
        self.scan_word(start).map(Some)
    }

    /// Produce the next token and check it against `expected`
    pub fn expect(&mut self, expected: impl Into<TokenPattern>) -> Result<Token<'src>, ScanError> {
        let expected = expected.into();
        let token = self
            .next_token()?
            .ok_or(ScanError::UnexpectedEndOfInput { expected })?;
        if !expected.matches(token.id) {
            return Err(ScanError::UnexpectedToken {
                expected,
                found: token.id,
                span: token.span,
                at: token.location.into(),
            });
        }
        Ok(token)
    }

    /// Drain the remaining input into a vector, stopping at the first error
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>, ScanError> {
        self.collect()
    }

    /// Skip whitespace, sentinels and comments. Returns `false` once the input is exhausted.
    fn trim(&mut self) -> Result<bool, ScanError> {
        loop {
            self.cursor.skip_whitespace_and_sentinels();
            if self.cursor.is_at_end() {
                return Ok(false);
            }
            let Some(comment) = self.cursor.comment_at_cursor() else {
                return Ok(true);
            };
            let opened_at = self.cursor.location();
            let close = comment.close.as_bytes();
            self.cursor.skip(comment.open.as_bytes());
            // Comment bodies are opaque: other openers inside them are plain text
            if !self.cursor.find(close) {
                return Err(ScanError::UnterminatedDelimiter {
                    construct: Construct::Comment,
                    delimiter: String::from_utf8_lossy(close).into_owned(),
                    at: SourcePosition::from(opened_at),
                });
            }
            self.cursor.skip(close);
        }
    }

    /// Move the cursor onto a string or field `closer`, skipping comments on the way
    fn seek_closer(
        &mut self,
        closer: &'lex [u8],
        construct: Construct,
        opened_at: Location<'src>,
    ) -> Result<(), ScanError> {
        self.cursor.find_skipping_comments(closer).map_err(|missing| {
            let construct = if missing == closer {
                construct
            } else {
                Construct::Comment
            };
            ScanError::UnterminatedDelimiter {
                construct,
                delimiter: String::from_utf8_lossy(missing).into_owned(),
                at: SourcePosition::from(opened_at),
            }
        })
    }

    fn scan_string(&mut self, start: Location<'src>) -> Result<Option<Token<'src>>, ScanError> {
        let lexicon = self.lexicon;
        let Some(index) = self.cursor.current().and_then(|byte| lexicon.string_index(byte)) else {
            return Ok(None);
        };
        let delimiter = &lexicon.strings()[index];

        self.cursor.advance_one();
        let interior_start = self.cursor.offset();
        self.seek_closer(
            std::slice::from_ref(&delimiter.close),
            Construct::String,
            start,
        )?;
        let span = Span::new(interior_start, self.cursor.offset());
        self.cursor.advance_one();

        Ok(Some(self.token(TokenKind::String, index, start, span)))
    }

    fn scan_symbol(&mut self, start: Location<'src>) -> Option<Token<'src>> {
        let index = self.lexicon.symbol_index(self.cursor.current()?)?;
        let offset = self.cursor.offset();
        self.cursor.advance_one();
        Some(self.token(TokenKind::Symbol, index, start, Span::new(offset, offset + 1)))
    }

    fn scan_field(&mut self, start: Location<'src>) -> Result<Option<Token<'src>>, ScanError> {
        let lexicon = self.lexicon;
        let Some(index) = lexicon
            .fields()
            .iter()
            .position(|field| self.cursor.starts_with(field.prefix.as_bytes()))
        else {
            return Ok(None);
        };
        let field = &lexicon.fields()[index];

        self.cursor.skip(field.prefix.as_bytes());
        let interior_start = self.cursor.offset();
        self.seek_closer(field.suffix.as_bytes(), Construct::Field, start)?;
        let span = Span::new(interior_start, self.cursor.offset());
        self.cursor.skip(field.suffix.as_bytes());

        Ok(Some(self.token(TokenKind::Field, index, start, span)))
    }

    fn scan_word(&mut self, start: Location<'src>) -> Result<Token<'src>, ScanError> {
        let word_start = self.cursor.offset();
        while !self.cursor.at_word_boundary() {
            self.cursor.advance_one();
        }
        let span = Span::new(word_start, self.cursor.offset());
        // Every tier before this one consumes the bytes that would end a candidate early
        debug_assert!(!span.is_empty(), "empty word candidate at {}", start);
        let candidate = self.cursor.slice(span);

        if let Some(index) = self.lexicon.word_index(candidate) {
            return Ok(self.token(TokenKind::Word, index, start, span));
        }
        if let Some(kind) = numbers::classify(candidate, self.lexicon.numbers()) {
            return Ok(self.token(kind, 0, start, span));
        }
        match self.lexicon.unknown() {
            UnknownPolicy::Mark => Ok(self.token(TokenKind::Unknown, 0, start, span)),
            UnknownPolicy::Preserve => Ok(self.token(
                TokenKind::Unknown,
                PRESERVED_UNKNOWN as usize,
                start,
                span,
            )),
            UnknownPolicy::Forbid => Err(ScanError::UnrecognizedLiteral {
                text: String::from_utf8_lossy(candidate).into_owned(),
                span,
                at: start.into(),
            }),
        }
    }

    fn token(
        &self,
        kind: TokenKind,
        index: usize,
        location: Location<'src>,
        span: Span,
    ) -> Token<'src> {
        Token {
            // Lexicon validation keeps every index below the reserved ANY_INDEX
            id: TokenId::new(kind, index as u32),
            location,
            span,
            value: self.cursor.slice(span),
        }
    }
}

impl<'src> Iterator for Scanner<'src, '_> {
    type Item = Result<Token<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.halted = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::lexicon::NumberFlags;

    fn kinds(lexicon: &Lexicon, input: &str) -> Vec<(TokenKind, u32, String)> {
        Scanner::new(input.as_bytes(), lexicon)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|token| (token.kind(), token.index(), token.text().into_owned()))
            .collect()
    }

    #[test]
    fn test_string_beats_symbol_for_shared_byte() {
        let lexicon = Lexicon::builder()
            .symbols(b"\"")
            .string(b'"', b'"')
            .build()
            .unwrap();
        assert_eq!(
            kinds(&lexicon, "\"x\""),
            vec![(TokenKind::String, 0, "x".to_string())]
        );
    }

    #[test]
    fn test_symbol_beats_field_prefix() {
        let lexicon = Lexicon::builder()
            .symbols(b"<")
            .field("<", ">")
            .build()
            .unwrap();
        assert_eq!(
            kinds(&lexicon, "<a>"),
            vec![
                (TokenKind::Symbol, 0, "<".to_string()),
                (TokenKind::Unknown, 0, "a>".to_string()),
            ]
        );
    }

    #[test]
    fn test_first_declared_field_wins() {
        let lexicon = Lexicon::builder()
            .field("</", ">")
            .field("<", ">")
            .whitespace(b" ")
            .build()
            .unwrap();
        assert_eq!(
            kinds(&lexicon, "<a> </a>"),
            vec![
                (TokenKind::Field, 1, "a".to_string()),
                (TokenKind::Field, 0, "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_words_stop_at_comment_openers() {
        let lexicon = Lexicon::builder()
            .comment("//", "\n")
            .numbers(NumberFlags::ALL)
            .build()
            .unwrap();
        assert_eq!(
            kinds(&lexicon, "12// note\n34"),
            vec![
                (TokenKind::Integer, 0, "12".to_string()),
                (TokenKind::Integer, 0, "34".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_inside_string_search() {
        let lexicon = Lexicon::builder()
            .string(b'"', b'"')
            .comment("/*", "*/")
            .build()
            .unwrap();
        let tokens = Scanner::new(b"\"a /* \" */ b\"", &lexicon).tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, b"a /* \" */ b");
    }

    #[test]
    fn test_unterminated_field_reports_opening_location() {
        let lexicon = Lexicon::builder()
            .field("<", ">")
            .whitespace(b" \n")
            .build()
            .unwrap();
        let err = Scanner::new(b"\n  <tag", &lexicon)
            .with_source_name("doc.xml")
            .tokenize()
            .unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedDelimiter {
                construct: Construct::Field,
                delimiter: ">".to_string(),
                at: SourcePosition {
                    source: Some("doc.xml".to_string()),
                    row: 2,
                    column: 3,
                },
            }
        );
        assert_eq!(
            err.to_string(),
            "doc.xml:2:3: unterminated field, expected \">\" before end of input"
        );
    }

    #[test]
    fn test_unterminated_comment_inside_string() {
        let lexicon = Lexicon::builder()
            .string(b'"', b'"')
            .comment("/*", "*/")
            .build()
            .unwrap();
        let err = Scanner::new(b"\"a /* b\"", &lexicon).tokenize().unwrap_err();
        assert!(matches!(
            err,
            ScanError::UnterminatedDelimiter {
                construct: Construct::Comment,
                ref delimiter,
                ..
            } if delimiter == "*/"
        ));
    }

    #[test]
    fn test_expect_reports_mismatch() {
        let lexicon = Lexicon::builder()
            .words(["let"])
            .symbols(b"=")
            .whitespace(b" ")
            .build()
            .unwrap();
        let mut scanner = Scanner::new(b"let = =", &lexicon);

        let token = scanner.expect(TokenPattern::exact(TokenKind::Word, 0)).unwrap();
        assert_eq!(token.value, b"let");
        assert!(scanner.expect(TokenKind::Symbol).is_ok());

        let err = scanner.expect(TokenKind::Word).unwrap_err();
        assert_eq!(err.to_string(), "1:7: expected Word:*, but got Symbol:0");

        let err = scanner.expect(TokenKind::Word).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnexpectedEndOfInput {
                expected: TokenPattern::any(TokenKind::Word)
            }
        );
    }

    #[test]
    fn test_iterator_halts_after_error() {
        let lexicon = Lexicon::builder()
            .string(b'"', b'"')
            .whitespace(b" ")
            .build()
            .unwrap();
        let mut scanner = Scanner::new(b"a \"open", &lexicon);
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_reset_restarts_from_scratch() {
        let lexicon = Lexicon::builder().whitespace(b" ").build().unwrap();
        let mut scanner = Scanner::new(b"a b", &lexicon);
        let first = scanner.tokenize().unwrap();
        assert!(scanner.next_token().unwrap().is_none());

        scanner.reset();
        assert_eq!(scanner.tokenize().unwrap(), first);
    }

    #[test]
    fn test_preserved_unknown_carries_index_one() {
        let lexicon = Lexicon::builder()
            .unknown(UnknownPolicy::Preserve)
            .build()
            .unwrap();
        assert_eq!(
            kinds(&lexicon, "hello"),
            vec![(TokenKind::Unknown, 1, "hello".to_string())]
        );
    }
}
