//! Scanner
//!
//! This module holds the tokenization engine: a [Lexicon] describing the surface lexicon of a
//! language, and a [Scanner] that walks a borrowed buffer and hands out classified tokens.
//!
//! Structure:
//!     - [lexicon]   the immutable configuration and its validation
//!     - [location]  row:column locations and byte spans
//!     - [token]     token kinds, identities and the packed identity encoding
//!     - cursor      position tracking and delimiter searches
//!     - numbers     numeric literal grammars
//!     - [engine]    the scan-priority algorithm, `expect`, and the iterator adapter
//!     - [extract]   copying values out, with escape decoding for strings
//!     - [render]    optional token rendering
//!     - [error]     error types
//!
//! Zero copy
//!
//!     Tokens never own text. Their `value` is a slice of the scanned buffer, so a token
//!     cannot outlive the buffer it came from. Extraction is the only operation that copies.

mod cursor;
pub mod engine;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod location;
mod numbers;
pub mod render;
pub mod token;

pub use engine::Scanner;
pub use error::{Construct, ExtractError, ScanError};
pub use extract::unescape;
pub use lexicon::{
    CommentDelimiter, FieldDelimiter, Lexicon, LexiconBuilder, LexiconError, NumberFlags,
    StringDelimiter, UnknownPolicy,
};
pub use location::{Location, SourcePosition, Span};
pub use render::{DefaultRenderer, NamedRenderer, RenderToken};
pub use token::{Token, TokenId, TokenKind, TokenPattern, ANY_INDEX, PRESERVED_UNKNOWN};
