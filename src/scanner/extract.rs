//! Value extraction
//!
//! Scanning never copies input. When a caller needs an independent copy of a token's value it
//! extracts it into a buffer it owns. String tokens have C-style backslash escapes decoded on
//! the way; every other kind is copied verbatim.
//!
//! Recognized escapes: `\n \t \r \\ \" \' \? \a \b \f \v`. Any other escape keeps the
//! backslash and the following byte. A trailing lone backslash is kept as is.

use super::error::ExtractError;
use super::token::{Token, TokenKind};

/// Decoded byte for the escape `\<byte>`, if it is a recognized escape
fn escape_value(byte: u8) -> Option<u8> {
    match byte {
        b'n' => Some(b'\n'),
        b't' => Some(b'\t'),
        b'r' => Some(b'\r'),
        b'\\' => Some(b'\\'),
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        b'?' => Some(b'?'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'v' => Some(0x0b),
        _ => None,
    }
}

/// Decode escapes in `raw`, feeding each output byte to `emit`
fn decode_with(raw: &[u8], mut emit: impl FnMut(u8)) {
    let mut bytes = raw.iter().copied();
    while let Some(byte) = bytes.next() {
        if byte != b'\\' {
            emit(byte);
            continue;
        }
        match bytes.next() {
            Some(escaped) => match escape_value(escaped) {
                Some(decoded) => emit(decoded),
                None => {
                    emit(b'\\');
                    emit(escaped);
                }
            },
            None => emit(b'\\'),
        }
    }
}

/// Decode escapes into a new buffer
pub fn unescape(raw: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(raw.len());
    decode_with(raw, |byte| decoded.push(byte));
    decoded
}

impl Token<'_> {
    /// Copy the token value into `destination`, returning the number of bytes written
    ///
    /// `destination` must hold at least the raw span length; decoding never grows a value.
    pub fn extract_into(&self, destination: &mut [u8]) -> Result<usize, ExtractError> {
        let required = self.value.len();
        if destination.len() < required {
            return Err(ExtractError::BufferTooSmall {
                required,
                available: destination.len(),
            });
        }

        if self.kind() != TokenKind::String {
            destination[..required].copy_from_slice(self.value);
            return Ok(required);
        }

        let mut written = 0;
        decode_with(self.value, |byte| {
            destination[written] = byte;
            written += 1;
        });
        Ok(written)
    }

    /// Copy the token value into a new buffer, decoding escapes for String tokens
    pub fn extract(&self) -> Vec<u8> {
        self.decoded().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::location::{Location, Span};
    use crate::scanner::token::TokenId;

    fn token(kind: TokenKind, value: &[u8]) -> Token<'_> {
        Token {
            id: TokenId::new(kind, 0),
            location: Location::start(None),
            span: Span::new(0, value.len()),
            value,
        }
    }

    #[test]
    fn test_string_escapes_are_decoded() {
        let string = token(TokenKind::String, br#"a\nb\tc\\d\"e\'f\?"#);
        let mut buffer = [0u8; 64];
        let written = string.extract_into(&mut buffer).unwrap();
        assert_eq!(&buffer[..written], b"a\nb\tc\\d\"e'f?");
    }

    #[test]
    fn test_control_escapes() {
        assert_eq!(unescape(br"\a\b\f\v\r"), vec![0x07, 0x08, 0x0c, 0x0b, b'\r']);
    }

    #[test]
    fn test_unknown_escape_keeps_backslash() {
        assert_eq!(unescape(br"\q\0"), b"\\q\\0".to_vec());
        assert_eq!(unescape(br"end\"), b"end\\".to_vec());
    }

    #[test]
    fn test_non_string_tokens_are_copied_verbatim() {
        let word = token(TokenKind::Unknown, br"a\nb");
        let mut buffer = [0u8; 4];
        assert_eq!(word.extract_into(&mut buffer), Ok(4));
        assert_eq!(&buffer, br"a\nb");
        assert_eq!(word.extract(), br"a\nb".to_vec());
    }

    #[test]
    fn test_small_destination_is_rejected() {
        let string = token(TokenKind::String, b"hello");
        let mut buffer = [0u8; 4];
        assert_eq!(
            string.extract_into(&mut buffer),
            Err(ExtractError::BufferTooSmall {
                required: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_extract_owned_decodes_strings() {
        let string = token(TokenKind::String, br"tab\there");
        assert_eq!(string.extract(), b"tab\there".to_vec());
    }
}
