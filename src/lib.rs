//! # scanlex
//!
//! A configuration-driven lexical scanner.
//!
//! A [Lexicon] declares what a language looks like on the surface: reserved words,
//! single-byte symbols, quoted strings, prefix/suffix fields, comments, whitespace and which
//! numeric literal families to recognize. A [Scanner] walks a borrowed byte buffer and produces
//! classified tokens with row:column locations and byte spans, without copying input.
//!
//! ```ignore
//! use scanlex::{Lexicon, NumberFlags, Scanner};
//!
//! let lexicon = Lexicon::builder()
//!     .symbols(b"=")
//!     .string(b'"', b'"')
//!     .whitespace(b" \n")
//!     .numbers(NumberFlags::ALL)
//!     .build()?;
//!
//! for token in Scanner::new(b"key = \"value\"", &lexicon) {
//!     println!("{}", lexicon.render(&token?)?);
//! }
//! ```
//!
//! File Layout
//!
//!     src/scanner       the tokenization engine (lexicon, cursor, token production)
//!     src/grammars.rs   built-in lexicons (json, xml, config, text)
//!     src/loader.rs     lexicon files and source loading
//!     src/bin           the `scanlex` command-line tool
//!
//! This is not a parser: it does not build trees or balance symbols, and it stops at the first
//! malformed construct.

pub mod grammars;
pub mod loader;
pub mod scanner;

pub use scanner::{
    Construct, ExtractError, Lexicon, LexiconBuilder, LexiconError, Location, NumberFlags,
    RenderToken, ScanError, Scanner, SourcePosition, Span, Token, TokenId, TokenKind,
    TokenPattern, UnknownPolicy, ANY_INDEX,
};
