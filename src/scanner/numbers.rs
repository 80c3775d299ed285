//! Numeric literal classification
//!
//! A word candidate that is not a configured word is tried against the enabled numeric
//! families in fixed priority: Integer, Float, Hex, Bin. Every grammar applies to the whole
//! candidate; a partial match never classifies.
//!
//! Integer, Hex and Bin shapes are recognized by a small logos lexer. Float is the `f64`
//! grammar of the standard library, which must consume the entire candidate.

use super::lexicon::NumberFlags;
use super::token::TokenKind;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum NumberShape {
    #[regex("[+-]?[0-9]+")]
    Integer,

    #[regex("0x[0-9a-fA-F]+")]
    Hex,

    #[regex("0b[01]+")]
    Bin,
}

/// Shape of `text` when a single integer/hex/bin literal spans all of it
fn shape_of(text: &str) -> Option<NumberShape> {
    let mut lexer = NumberShape::lexer(text);
    let shape = lexer.next()?.ok()?;
    (lexer.span() == (0..text.len())).then_some(shape)
}

pub fn is_integer(text: &str) -> bool {
    shape_of(text) == Some(NumberShape::Integer)
}

pub fn is_float(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

pub fn is_hex(text: &str) -> bool {
    shape_of(text) == Some(NumberShape::Hex)
}

pub fn is_bin(text: &str) -> bool {
    shape_of(text) == Some(NumberShape::Bin)
}

/// Classify a candidate against the enabled families, in priority order
pub fn classify(candidate: &[u8], flags: NumberFlags) -> Option<TokenKind> {
    if flags.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(candidate).ok()?;
    let families: [(NumberFlags, TokenKind, fn(&str) -> bool); 4] = [
        (NumberFlags::INTEGERS, TokenKind::Integer, is_integer),
        (NumberFlags::FLOATS, TokenKind::Float, is_float),
        (NumberFlags::HEX, TokenKind::Hex, is_hex),
        (NumberFlags::BIN, TokenKind::Bin, is_bin),
    ];
    families
        .into_iter()
        .find(|(flag, _, matches)| flags.contains(*flag) && matches(text))
        .map(|(_, kind, _)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(TokenKind::Integer))]
    #[case("-7", Some(TokenKind::Integer))]
    #[case("+007", Some(TokenKind::Integer))]
    #[case("3.14", Some(TokenKind::Float))]
    #[case("1e10", Some(TokenKind::Float))]
    #[case(".5", Some(TokenKind::Float))]
    #[case("0x1A", Some(TokenKind::Hex))]
    #[case("0xff", Some(TokenKind::Hex))]
    #[case("0b101", Some(TokenKind::Bin))]
    #[case("0x", None)]
    #[case("0b", None)]
    #[case("0b102", None)]
    #[case("0x1G", None)]
    #[case("12abc", None)]
    #[case("-", None)]
    #[case("+", None)]
    #[case("", None)]
    fn test_classify_all_families(#[case] text: &str, #[case] expected: Option<TokenKind>) {
        assert_eq!(classify(text.as_bytes(), NumberFlags::ALL), expected);
    }

    #[test]
    fn test_disabled_families_fall_through() {
        assert_eq!(classify(b"42", NumberFlags::FLOATS), Some(TokenKind::Float));
        assert_eq!(classify(b"42", NumberFlags::HEX | NumberFlags::BIN), None);
        assert_eq!(classify(b"0x1A", NumberFlags::INTEGERS), None);
        assert_eq!(classify(b"3.14", NumberFlags::NONE), None);
    }

    #[test]
    fn test_integer_grammar_is_full_span() {
        assert!(is_integer("0"));
        assert!(!is_integer("0x1A"));
        assert!(!is_integer("1 2"));
        assert!(!is_integer("--1"));
    }

    #[test]
    fn test_non_utf8_is_never_a_number() {
        assert_eq!(classify(b"\xff1", NumberFlags::ALL), None);
    }
}
