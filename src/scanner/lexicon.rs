//! Lexicon: the declarative description of a language's surface lexicon
//!
//!     A lexicon lists, in order, everything the scanner recognizes:
//!
//!         words        exact reserved words, matched against a whole delimited candidate
//!         symbols      single-byte symbols
//!         strings      single-byte open/close delimiter pairs
//!         fields       prefix/suffix string pairs (e.g. XML-like tags)
//!         comments     open/close string pairs, skipped entirely
//!         whitespace   ignorable bytes
//!
//!     plus the numeric literal families to recognize and what to do with text that matches
//!     nothing ([UnknownPolicy]).
//!
//!     Order is significant: at every priority tier the first matching entry wins, and the
//!     position of an entry is the index carried by the tokens it produces.
//!
//!     Lexicons are built through [LexiconBuilder], which validates every entry. Once built a
//!     lexicon is immutable and can be shared freely between scanners.

use super::render::RenderToken;
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;
use thiserror::Error;

/// A single-byte open/close pair delimiting a String token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDelimiter {
    pub open: u8,
    pub close: u8,
}

impl StringDelimiter {
    pub fn new(open: u8, close: u8) -> Self {
        Self { open, close }
    }
}

/// A prefix/suffix pair delimiting a Field token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDelimiter {
    pub prefix: String,
    pub suffix: String,
}

impl FieldDelimiter {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// An open/close pair delimiting a comment region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDelimiter {
    pub open: String,
    pub close: String,
}

impl CommentDelimiter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Numeric literal families the scanner recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberFlags(u8);

impl NumberFlags {
    pub const NONE: NumberFlags = NumberFlags(0);
    pub const INTEGERS: NumberFlags = NumberFlags(0x1);
    pub const FLOATS: NumberFlags = NumberFlags(0x2);
    pub const HEX: NumberFlags = NumberFlags(0x4);
    pub const BIN: NumberFlags = NumberFlags(0x8);
    pub const ALL: NumberFlags = NumberFlags(0xf);

    /// Build from raw bits, rejecting bits outside [NumberFlags::ALL]
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits & !Self::ALL.0 == 0).then_some(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: NumberFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for NumberFlags {
    type Output = NumberFlags;

    fn bitor(self, rhs: NumberFlags) -> NumberFlags {
        NumberFlags(self.0 | rhs.0)
    }
}

/// What to do with a candidate that is neither a word nor an enabled number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownPolicy {
    /// Emit an Unknown token with index 0
    #[default]
    Mark,
    /// Emit an Unknown token with index 1, asking renderers to keep the literal form
    Preserve,
    /// Fail with an unrecognized-literal error
    Forbid,
}

/// Errors raised while building a lexicon
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl LexiconError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LexiconError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// An immutable, validated lexicon
#[derive(Clone, Default)]
pub struct Lexicon {
    words: Vec<String>,
    symbols: Vec<u8>,
    strings: Vec<StringDelimiter>,
    fields: Vec<FieldDelimiter>,
    comments: Vec<CommentDelimiter>,
    whitespace: Vec<u8>,
    numbers: NumberFlags,
    unknown: UnknownPolicy,
    renderer: Option<Arc<dyn RenderToken>>,
}

impl Lexicon {
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn strings(&self) -> &[StringDelimiter] {
        &self.strings
    }

    pub fn fields(&self) -> &[FieldDelimiter] {
        &self.fields
    }

    pub fn comments(&self) -> &[CommentDelimiter] {
        &self.comments
    }

    pub fn whitespace(&self) -> &[u8] {
        &self.whitespace
    }

    pub fn numbers(&self) -> NumberFlags {
        self.numbers
    }

    pub fn unknown(&self) -> UnknownPolicy {
        self.unknown
    }

    pub fn renderer(&self) -> Option<&dyn RenderToken> {
        self.renderer.as_deref()
    }

    pub fn is_whitespace(&self, byte: u8) -> bool {
        self.whitespace.contains(&byte)
    }

    pub fn symbol_index(&self, byte: u8) -> Option<usize> {
        self.symbols.iter().position(|&symbol| symbol == byte)
    }

    pub fn string_index(&self, byte: u8) -> Option<usize> {
        self.strings.iter().position(|string| string.open == byte)
    }

    /// Exact, full-length word lookup
    pub fn word_index(&self, candidate: &[u8]) -> Option<usize> {
        self.words
            .iter()
            .position(|word| word.as_bytes() == candidate)
    }
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("words", &self.words)
            .field("symbols", &String::from_utf8_lossy(&self.symbols))
            .field("strings", &self.strings)
            .field("fields", &self.fields)
            .field("comments", &self.comments)
            .field("whitespace", &self.whitespace)
            .field("numbers", &self.numbers)
            .field("unknown", &self.unknown)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Builder for [Lexicon]
///
/// Entries keep the order in which they are added.
#[derive(Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.lexicon.words.push(word.into());
        self
    }

    pub fn words<I, S>(self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        words.into_iter().fold(self, |builder, word| builder.word(word))
    }

    pub fn symbol(mut self, symbol: u8) -> Self {
        self.lexicon.symbols.push(symbol);
        self
    }

    pub fn symbols(mut self, symbols: &[u8]) -> Self {
        self.lexicon.symbols.extend_from_slice(symbols);
        self
    }

    pub fn string(mut self, open: u8, close: u8) -> Self {
        self.lexicon.strings.push(StringDelimiter::new(open, close));
        self
    }

    pub fn field(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.lexicon
            .fields
            .push(FieldDelimiter::new(prefix, suffix));
        self
    }

    pub fn comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.lexicon
            .comments
            .push(CommentDelimiter::new(open, close));
        self
    }

    pub fn whitespace(mut self, whitespace: &[u8]) -> Self {
        self.lexicon.whitespace.extend_from_slice(whitespace);
        self
    }

    pub fn numbers(mut self, numbers: NumberFlags) -> Self {
        self.lexicon.numbers = numbers;
        self
    }

    pub fn unknown(mut self, unknown: UnknownPolicy) -> Self {
        self.lexicon.unknown = unknown;
        self
    }

    pub fn renderer(mut self, renderer: impl RenderToken + 'static) -> Self {
        self.lexicon.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn build(self) -> Result<Lexicon, LexiconError> {
        let lexicon = self.lexicon;

        check_count("words", lexicon.words.len())?;
        check_count("symbols", lexicon.symbols.len())?;
        check_count("strings", lexicon.strings.len())?;
        check_count("fields", lexicon.fields.len())?;

        if let Some(position) = lexicon.words.iter().position(String::is_empty) {
            return Err(LexiconError::invalid(
                "words",
                format!("entry {} is empty", position),
            ));
        }
        for (position, field) in lexicon.fields.iter().enumerate() {
            if field.prefix.is_empty() || field.suffix.is_empty() {
                return Err(LexiconError::invalid(
                    "fields",
                    format!("entry {} has an empty prefix or suffix", position),
                ));
            }
        }
        for (position, comment) in lexicon.comments.iter().enumerate() {
            if comment.open.is_empty() || comment.close.is_empty() {
                return Err(LexiconError::invalid(
                    "comments",
                    format!("entry {} has an empty delimiter", position),
                ));
            }
        }
        for (position, string) in lexicon.strings.iter().enumerate() {
            if is_sentinel(string.open) || is_sentinel(string.close) {
                return Err(LexiconError::invalid(
                    "strings",
                    format!("entry {} uses a sentinel byte as delimiter", position),
                ));
            }
        }
        if let Some(symbol) = lexicon.symbols.iter().find(|&&symbol| is_sentinel(symbol)) {
            return Err(LexiconError::invalid(
                "symbols",
                format!("sentinel byte {:#04x} cannot be a symbol", symbol),
            ));
        }

        Ok(lexicon)
    }
}

/// Bytes that mark a logical end of input inside a buffer: NUL and the byte value of `EOF`
pub fn is_sentinel(byte: u8) -> bool {
    byte == 0x00 || byte == 0xFF
}

fn check_count(field: &'static str, count: usize) -> Result<(), LexiconError> {
    if count >= super::token::ANY_INDEX as usize {
        return Err(LexiconError::invalid(
            field,
            format!("{} entries exceed the index range", count),
        ));
    }
    Ok(())
}
