//! Token identity and token values
//!
//!     A token's identity is the pair `(kind, index)`. The kind says what sort of lexeme was
//!     matched, the index says which configured entry matched it:
//!
//!         Word, Symbol, String, Field:  position of the matching entry in the lexicon
//!         Integer, Float, Hex, Bin:     always 0
//!         Unknown:                      0 for marked unknowns, 1 for preserved literals
//!
//!     Collaborators that need a single integer (printers, grammar tables) can use the packed
//!     form from [TokenId::to_bits]: the kind in the high 32 bits, the index in the low 32.
//!     [ANY_INDEX] is reserved in that encoding to mean "any index of this kind" and only ever
//!     appears in an expected identity ([TokenPattern]), never in a produced token.

use super::extract;
use super::location::{Location, Span};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Reserved index value meaning "any index" in a packed [TokenPattern]
pub const ANY_INDEX: u32 = u32::MAX;

/// Index carried by Unknown tokens scanned under [UnknownPolicy::Preserve](super::UnknownPolicy)
pub const PRESERVED_UNKNOWN: u32 = 1;

/// The closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u32)]
pub enum TokenKind {
    Word = 0,
    Symbol = 1,
    String = 2,
    Field = 3,
    Integer = 4,
    Float = 5,
    Hex = 6,
    Bin = 7,
    Unknown = 8,
}

impl TokenKind {
    pub const ALL: [TokenKind; 9] = [
        TokenKind::Word,
        TokenKind::Symbol,
        TokenKind::String,
        TokenKind::Field,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::Hex,
        TokenKind::Bin,
        TokenKind::Unknown,
    ];

    /// Display name used by renderers and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Word => "Word",
            TokenKind::Symbol => "Symbol",
            TokenKind::String => "String",
            TokenKind::Field => "Field",
            TokenKind::Integer => "Int",
            TokenKind::Float => "Float",
            TokenKind::Hex => "Hex",
            TokenKind::Bin => "Bin",
            TokenKind::Unknown => "Unknown",
        }
    }

    pub fn from_u32(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::Float | TokenKind::Hex | TokenKind::Bin
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a produced token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenId {
    pub kind: TokenKind,
    pub index: u32,
}

impl TokenId {
    pub fn new(kind: TokenKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// Pack into the cross-boundary integer form
    pub fn to_bits(self) -> u64 {
        ((self.kind as u64) << 32) | u64::from(self.index)
    }

    /// Unpack an integer produced by [TokenId::to_bits]
    ///
    /// Returns `None` for an unknown kind or for the reserved [ANY_INDEX].
    pub fn from_bits(bits: u64) -> Option<Self> {
        let pattern = TokenPattern::from_bits(bits)?;
        pattern.index.map(|index| Self::new(pattern.kind, index))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.index)
    }
}

/// An expected identity: a kind plus either an exact index or any index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenPattern {
    pub kind: TokenKind,
    pub index: Option<u32>,
}

impl TokenPattern {
    /// Match any token of `kind`
    pub fn any(kind: TokenKind) -> Self {
        Self { kind, index: None }
    }

    /// Match only the token of `kind` produced by entry `index`
    pub fn exact(kind: TokenKind, index: u32) -> Self {
        Self {
            kind,
            index: Some(index),
        }
    }

    pub fn matches(&self, id: TokenId) -> bool {
        self.kind == id.kind && self.index.map_or(true, |index| index == id.index)
    }

    pub fn to_bits(self) -> u64 {
        ((self.kind as u64) << 32) | u64::from(self.index.unwrap_or(ANY_INDEX))
    }

    pub fn from_bits(bits: u64) -> Option<Self> {
        let kind = TokenKind::from_u32((bits >> 32) as u32)?;
        let index = (bits & 0xFFFF_FFFF) as u32;
        Some(if index == ANY_INDEX {
            Self::any(kind)
        } else {
            Self::exact(kind, index)
        })
    }
}

impl From<TokenId> for TokenPattern {
    fn from(id: TokenId) -> Self {
        Self::exact(id.kind, id.index)
    }
}

impl From<TokenKind> for TokenPattern {
    fn from(kind: TokenKind) -> Self {
        Self::any(kind)
    }
}

impl fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}:{}", self.kind, index),
            None => write!(f, "{}:*", self.kind),
        }
    }
}

/// A classified, located slice of the input buffer
///
/// `value` borrows the scanned buffer; for String and Field tokens it is the interior between
/// the delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub id: TokenId,
    pub location: Location<'src>,
    pub span: Span,
    #[serde(rename = "text", serialize_with = "serialize_lossy")]
    pub value: &'src [u8],
}

impl<'src> Token<'src> {
    pub fn kind(&self) -> TokenKind {
        self.id.kind
    }

    pub fn index(&self) -> u32 {
        self.id.index
    }

    pub fn is(&self, pattern: impl Into<TokenPattern>) -> bool {
        pattern.into().matches(self.id)
    }

    /// The raw span text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> Cow<'src, str> {
        String::from_utf8_lossy(self.value)
    }

    /// The token value with escapes decoded for String tokens
    ///
    /// Borrows the input whenever nothing needs decoding.
    pub fn decoded(&self) -> Cow<'src, [u8]> {
        if self.kind() == TokenKind::String && self.value.contains(&b'\\') {
            Cow::Owned(extract::unescape(self.value))
        } else {
            Cow::Borrowed(self.value)
        }
    }
}

fn serialize_lossy<S: Serializer>(value: &&[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(value))
}
