//! Property-based tests for the scanner
//!
//! These exercise scanning with generated inputs: arbitrary bytes must never panic, spans must
//! stay inside the buffer, and inputs made only of ignorable material must produce no tokens.

use proptest::prelude::*;
use scanlex::grammars;
use scanlex::{Lexicon, NumberFlags, Scanner, TokenKind};

fn sample_lexicon() -> Lexicon {
    Lexicon::builder()
        .words(["let", "in", "fn"])
        .symbols(b"=;(){}")
        .string(b'"', b'"')
        .field("<", ">")
        .comment("/*", "*/")
        .comment("#", "\n")
        .whitespace(b" \n\t")
        .numbers(NumberFlags::ALL)
        .build()
        .unwrap()
}

/// Whitespace runs and closed comments, in any order
fn ignorable_input() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[ \n\t]{1,4}",
        "[a-z ]{0,8}".prop_map(|body| format!("/*{}*/", body)),
        "[a-z ]{0,8}".prop_map(|body| format!("#{}\n", body)),
    ];
    prop::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn test_arbitrary_bytes_never_panic(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let lexicon = sample_lexicon();
        let mut scanner = Scanner::new(&input, &lexicon);
        let mut produced = 0;
        for result in &mut scanner {
            match result {
                Ok(token) => {
                    prop_assert!(token.span.start <= token.span.end);
                    prop_assert!(token.span.end <= input.len());
                    prop_assert_eq!(&input[token.span.range()], token.value);
                    produced += 1;
                    // Every token consumes at least one byte
                    prop_assert!(produced <= input.len());
                }
                Err(_) => break,
            }
        }
        prop_assert!(scanner.next().is_none());
    }

    #[test]
    fn test_ignorable_input_yields_no_tokens(input in ignorable_input()) {
        let lexicon = sample_lexicon();
        let mut scanner = Scanner::new(input.as_bytes(), &lexicon);
        prop_assert_eq!(scanner.next_token(), Ok(None));
    }

    #[test]
    fn test_words_scan_to_their_index(
        picks in prop::collection::vec(0usize..3, 1..20),
        separator in "[ \n\t]{1,3}",
    ) {
        let lexicon = sample_lexicon();
        let input = picks
            .iter()
            .map(|&pick| lexicon.words()[pick].as_str())
            .collect::<Vec<_>>()
            .join(separator.as_str());
        let tokens = Scanner::new(input.as_bytes(), &lexicon).tokenize().unwrap();
        prop_assert_eq!(tokens.len(), picks.len());
        for (token, &pick) in tokens.iter().zip(picks.iter()) {
            prop_assert_eq!(token.kind(), TokenKind::Word);
            prop_assert_eq!(token.index() as usize, pick);
        }
    }

    #[test]
    fn test_integers_scan_whole(value in any::<i64>()) {
        let lexicon = sample_lexicon();
        let input = value.to_string();
        let tokens = Scanner::new(input.as_bytes(), &lexicon).tokenize().unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind(), TokenKind::Integer);
        prop_assert_eq!(tokens[0].text(), input.as_str());
    }

    #[test]
    fn test_builtin_lexicons_never_panic(input in "\\PC{0,64}") {
        for grammar in &grammars::GRAMMARS {
            let _ = Scanner::new(input.as_bytes(), grammar.lexicon()).tokenize();
        }
    }
}
