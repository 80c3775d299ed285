//! Loading lexicons and sources from disk
//!
//! Lexicon files describe a [Lexicon] in YAML (`.yaml`, `.yml`) or JSON (`.json`):
//!
//! ```yaml
//! words: [let, in]
//! symbols: ["=", ";"]
//! strings: [{open: '"', close: '"'}]
//! fields: [{prefix: "<", suffix: ">"}]
//! comments: [{open: "/*", close: "*/"}]
//! whitespace: [" ", "\n", "\t"]
//! numbers: all            # or a list: [integer, float, hex, bin]
//! unknown: forbid         # mark | preserve | forbid
//! ```
//!
//! Every key is optional. Files go through [LexiconBuilder], so they are validated exactly like
//! lexicons built in code.

use crate::scanner::{Lexicon, LexiconBuilder, LexiconError, NumberFlags, UnknownPolicy};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading lexicon files or sources
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid YAML lexicon: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON lexicon: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported lexicon file extension for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Lexicon(#[from] LexiconError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFamily {
    Integer,
    Float,
    Hex,
    Bin,
}

impl NumberFamily {
    fn flag(self) -> NumberFlags {
        match self {
            NumberFamily::Integer => NumberFlags::INTEGERS,
            NumberFamily::Float => NumberFlags::FLOATS,
            NumberFamily::Hex => NumberFlags::HEX,
            NumberFamily::Bin => NumberFlags::BIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumbersSpec {
    Preset(NumbersPreset),
    Families(Vec<NumberFamily>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumbersPreset {
    All,
    None,
}

impl Default for NumbersSpec {
    fn default() -> Self {
        NumbersSpec::Preset(NumbersPreset::None)
    }
}

impl NumbersSpec {
    fn flags(&self) -> NumberFlags {
        match self {
            NumbersSpec::Preset(NumbersPreset::All) => NumberFlags::ALL,
            NumbersSpec::Preset(NumbersPreset::None) => NumberFlags::NONE,
            NumbersSpec::Families(families) => families
                .iter()
                .fold(NumberFlags::NONE, |flags, family| flags | family.clone().flag()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSpec {
    #[default]
    Mark,
    Preserve,
    Forbid,
}

impl From<UnknownSpec> for UnknownPolicy {
    fn from(spec: UnknownSpec) -> Self {
        match spec {
            UnknownSpec::Mark => UnknownPolicy::Mark,
            UnknownSpec::Preserve => UnknownPolicy::Preserve,
            UnknownSpec::Forbid => UnknownPolicy::Forbid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairSpec {
    #[serde(alias = "prefix")]
    pub open: String,
    #[serde(alias = "suffix")]
    pub close: String,
}

/// On-disk form of a lexicon
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconFile {
    pub words: Vec<String>,
    pub symbols: Vec<String>,
    pub strings: Vec<PairSpec>,
    pub fields: Vec<PairSpec>,
    pub comments: Vec<PairSpec>,
    pub whitespace: Vec<String>,
    pub numbers: NumbersSpec,
    pub unknown: UnknownSpec,
}

/// A configured single byte, e.g. a symbol or a string delimiter
fn single_byte(field: &'static str, text: &str) -> Result<u8, LexiconError> {
    match text.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(LexiconError::InvalidArgument {
            field,
            reason: format!("{:?} is not a single byte", text),
        }),
    }
}

impl LexiconFile {
    pub fn from_yaml(text: &str) -> Result<Self, LoaderError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, LoaderError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_lexicon(self) -> Result<Lexicon, LexiconError> {
        let mut builder: LexiconBuilder = Lexicon::builder().words(self.words);
        for symbol in &self.symbols {
            builder = builder.symbol(single_byte("symbols", symbol)?);
        }
        for string in &self.strings {
            builder = builder.string(
                single_byte("strings", &string.open)?,
                single_byte("strings", &string.close)?,
            );
        }
        for field in self.fields {
            builder = builder.field(field.open, field.close);
        }
        for comment in self.comments {
            builder = builder.comment(comment.open, comment.close);
        }
        for whitespace in &self.whitespace {
            builder = builder.whitespace(&[single_byte("whitespace", whitespace)?]);
        }
        builder
            .numbers(self.numbers.flags())
            .unknown(self.unknown.into())
            .build()
    }
}

/// Load a lexicon file, picking the format from the file extension
pub fn load_lexicon(path: impl AsRef<Path>) -> Result<Lexicon, LoaderError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();
    let file = match extension {
        "yaml" | "yml" => LexiconFile::from_yaml(&text)?,
        "json" => LexiconFile::from_json(&text)?,
        _ => return Err(LoaderError::UnsupportedFormat(path.display().to_string())),
    };
    Ok(file.into_lexicon()?)
}

/// Read a source file as raw bytes
pub fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>, LoaderError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{Scanner, TokenKind};

    const SAMPLE: &str = r##"
words: [let]
symbols: ["="]
strings: [{open: '"', close: '"'}]
comments: [{open: "#", close: "\n"}]
whitespace: [" ", "\n"]
numbers: [integer, hex]
unknown: forbid
"##;

    #[test]
    fn test_yaml_lexicon() {
        let lexicon = LexiconFile::from_yaml(SAMPLE)
            .unwrap()
            .into_lexicon()
            .unwrap();
        assert_eq!(lexicon.words(), ["let".to_string()]);
        assert_eq!(lexicon.numbers(), NumberFlags::INTEGERS | NumberFlags::HEX);
        assert_eq!(lexicon.unknown(), UnknownPolicy::Forbid);

        let err = Scanner::new(b"let x = 0x10 # done\n", &lexicon)
            .tokenize()
            .unwrap_err();
        assert!(err.to_string().contains("unrecognized literal \"x\""));

        let tokens = Scanner::new(b"let = 0x10 # done\n", &lexicon)
            .tokenize()
            .unwrap();
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind()).collect();
        assert_eq!(kinds, [TokenKind::Word, TokenKind::Symbol, TokenKind::Hex]);
    }

    #[test]
    fn test_json_lexicon_with_fields() {
        let file = LexiconFile::from_json(
            r#"{"fields": [{"prefix": "{{", "suffix": "}}"}], "numbers": "all"}"#,
        )
        .unwrap();
        let lexicon = file.into_lexicon().unwrap();
        assert_eq!(lexicon.fields()[0].prefix, "{{");
        assert_eq!(lexicon.numbers(), NumberFlags::ALL);
        assert_eq!(lexicon.unknown(), UnknownPolicy::Mark);
    }

    #[test]
    fn test_multi_byte_symbol_is_rejected() {
        let err = LexiconFile::from_yaml("symbols: [\"==\"]")
            .unwrap()
            .into_lexicon()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid symbols: \"==\" is not a single byte");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(LexiconFile::from_yaml("keywords: [if]").is_err());
    }

    #[test]
    fn test_load_lexicon_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("lang.yml");
        fs::write(&yaml, SAMPLE).unwrap();
        assert!(load_lexicon(&yaml).is_ok());

        let toml = dir.path().join("lang.toml");
        fs::write(&toml, "").unwrap();
        assert!(matches!(
            load_lexicon(&toml),
            Err(LoaderError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            load_lexicon(dir.path().join("missing.json")),
            Err(LoaderError::Io { .. })
        ));
    }
}
