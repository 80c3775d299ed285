//! Scanner errors
//!
//! Every failure is reported as a value carrying enough context (location, delimiter or
//! candidate text) for the caller to produce a diagnostic. The scanner never recovers on its
//! own: after an error the caller stops scanning.

use super::location::{SourcePosition, Span};
use super::token::{TokenId, TokenPattern};
use std::fmt;
use thiserror::Error;

/// The delimited construct left open by an [ScanError::UnterminatedDelimiter]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    String,
    Field,
    Comment,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Construct::String => "string",
            Construct::Field => "field",
            Construct::Comment => "comment",
        })
    }
}

/// Errors produced while scanning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A string, field or comment closer was not found before the end of the buffer
    #[error("{at}: unterminated {construct}, expected {delimiter:?} before end of input")]
    UnterminatedDelimiter {
        construct: Construct,
        delimiter: String,
        at: SourcePosition,
    },

    /// A candidate matched no word or enabled number, and unknown literals are forbidden
    #[error("{at}: unrecognized literal {text:?}")]
    UnrecognizedLiteral {
        text: String,
        span: Span,
        at: SourcePosition,
    },

    /// The next token did not have the expected identity
    #[error("{at}: expected {expected}, but got {found}")]
    UnexpectedToken {
        expected: TokenPattern,
        found: TokenId,
        span: Span,
        at: SourcePosition,
    },

    /// Input ended while a token was still expected
    #[error("expected {expected}, but reached end of input")]
    UnexpectedEndOfInput { expected: TokenPattern },
}

impl ScanError {
    /// Where the error was detected, when it has a location
    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            ScanError::UnterminatedDelimiter { at, .. }
            | ScanError::UnrecognizedLiteral { at, .. }
            | ScanError::UnexpectedToken { at, .. } => Some(at),
            ScanError::UnexpectedEndOfInput { .. } => None,
        }
    }
}

/// Errors produced while extracting a token value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("destination holds {available} bytes, value needs {required}")]
    BufferTooSmall { required: usize, available: usize },
}
