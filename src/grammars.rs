//! Built-in lexicons
//!
//! Ready-made lexicons for a few common formats. They are plain [Lexicon] values, built once on
//! first use and shared for the lifetime of the process.
//!
//! - `json`    words `true false null`, the six structural symbols, `"` strings, all number
//!             families; anything else is an error
//! - `xml`     tags as fields (`</…>` before `<…>`), numbers, everything else marked unknown
//! - `config`  `key = value` lines: `=` and newline symbols, `"` strings, numbers, bare text
//!             preserved
//! - `text`    prose: punctuation symbols, bare words preserved

use crate::scanner::{Lexicon, NamedRenderer, NumberFlags, UnknownPolicy};
use once_cell::sync::Lazy;

/// Word and symbol indices of the `json` lexicon
pub mod json {
    pub const TRUE: u32 = 0;
    pub const FALSE: u32 = 1;
    pub const NULL: u32 = 2;

    pub const MAP_OPEN: u32 = 0;
    pub const MAP_CLOSE: u32 = 1;
    pub const ARRAY_OPEN: u32 = 2;
    pub const ARRAY_CLOSE: u32 = 3;
    pub const SEPARATOR: u32 = 4;
    pub const MAP_SEPARATOR: u32 = 5;
}

/// Symbol indices of the `config` lexicon
pub mod config {
    pub const SEPARATOR: u32 = 0;
    pub const NEW_LINE: u32 = 1;
}

/// Field indices of the `xml` lexicon
pub mod xml {
    pub const CLOSING_TAG: u32 = 0;
    pub const OPENING_TAG: u32 = 1;
}

pub static JSON: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::builder()
        .words(["true", "false", "null"])
        .symbols(b"{}[],:")
        .string(b'"', b'"')
        .whitespace(b" \n\t\r")
        .numbers(NumberFlags::ALL)
        .unknown(UnknownPolicy::Forbid)
        .renderer(NamedRenderer {
            words: &["True", "False", "Null"],
            symbols: &[
                "MapOpen",
                "MapClose",
                "ArrayOpen",
                "ArrayClose",
                "Sep",
                "MapSep",
            ],
        })
        .build()
        .expect("json lexicon is valid")
});

pub static XML: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::builder()
        .field("</", ">")
        .field("<", ">")
        .whitespace(b" \n\t\r")
        .numbers(NumberFlags::ALL)
        .build()
        .expect("xml lexicon is valid")
});

pub static CONFIG: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::builder()
        .symbols(b"=\n")
        .string(b'"', b'"')
        .whitespace(b" \t")
        .numbers(NumberFlags::ALL)
        .unknown(UnknownPolicy::Preserve)
        .renderer(NamedRenderer {
            words: &[],
            symbols: &["Separator", "NewLine"],
        })
        .build()
        .expect("config lexicon is valid")
});

pub static TEXT: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::builder()
        .symbols(b",.!?:;\"")
        .whitespace(b" \n\t\r")
        .unknown(UnknownPolicy::Preserve)
        .build()
        .expect("text lexicon is valid")
});

/// A named built-in lexicon
pub struct Grammar {
    pub name: &'static str,
    pub description: &'static str,
    lexicon: &'static Lazy<Lexicon>,
}

impl Grammar {
    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }
}

pub static GRAMMARS: [Grammar; 4] = [
    Grammar {
        name: "json",
        description: "JSON documents; unknown literals are errors",
        lexicon: &JSON,
    },
    Grammar {
        name: "xml",
        description: "XML-like markup with tags scanned as fields",
        lexicon: &XML,
    },
    Grammar {
        name: "config",
        description: "key = value configuration lines",
        lexicon: &CONFIG,
    },
    Grammar {
        name: "text",
        description: "plain prose split into words and punctuation",
        lexicon: &TEXT,
    },
];

/// Look up a built-in lexicon by name
pub fn by_name(name: &str) -> Option<&'static Lexicon> {
    GRAMMARS
        .iter()
        .find(|grammar| grammar.name == name)
        .map(Grammar::lexicon)
}
