//! Token rendering
//!
//! Rendering is not part of scanning. A lexicon may carry a [RenderToken] implementation so
//! that tools can print tokens in a grammar-specific way (e.g. naming JSON symbols); without
//! one, [DefaultRenderer] is used.
//!
//! Default format, one token per line:
//!
//!     [source:]row:column Kind: value
//!
//! where Word and Symbol values are quoted with `'`, Strings with `"`, Fields with `[ ]`,
//! Unknowns with `< >`, and numbers and preserved Unknowns are printed as is.

use super::lexicon::Lexicon;
use super::token::{Token, TokenKind, PRESERVED_UNKNOWN};
use std::fmt::{self, Write};

/// Capability to render a token as text
pub trait RenderToken: Send + Sync {
    fn render(&self, token: &Token<'_>, out: &mut dyn Write) -> fmt::Result;
}

fn write_header(token: &Token<'_>, out: &mut dyn Write) -> fmt::Result {
    write!(out, "{} {}: ", token.location, token.kind())
}

/// Renders only the token value, decorated according to its kind
pub fn write_value(token: &Token<'_>, out: &mut dyn Write) -> fmt::Result {
    let text = token.text();
    match token.kind() {
        TokenKind::Word | TokenKind::Symbol => write!(out, "'{}'", text),
        TokenKind::String => write!(out, "\"{}\"", text),
        TokenKind::Field => write!(out, "[{}]", text),
        TokenKind::Integer | TokenKind::Float | TokenKind::Hex | TokenKind::Bin => {
            out.write_str(&text)
        }
        TokenKind::Unknown if token.index() == PRESERVED_UNKNOWN => out.write_str(&text),
        TokenKind::Unknown => write!(out, "<{}>", text),
    }
}

/// The formatter used when a lexicon carries no renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl RenderToken for DefaultRenderer {
    fn render(&self, token: &Token<'_>, out: &mut dyn Write) -> fmt::Result {
        write_header(token, out)?;
        write_value(token, out)
    }
}

/// Renders words and symbols by name, everything else like [DefaultRenderer]
///
/// Names are looked up by token index; entries without a name fall back to the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedRenderer {
    pub words: &'static [&'static str],
    pub symbols: &'static [&'static str],
}

impl NamedRenderer {
    fn name_of(&self, token: &Token<'_>) -> Option<&'static str> {
        let names = match token.kind() {
            TokenKind::Word => self.words,
            TokenKind::Symbol => self.symbols,
            _ => return None,
        };
        names.get(token.index() as usize).copied()
    }
}

impl RenderToken for NamedRenderer {
    fn render(&self, token: &Token<'_>, out: &mut dyn Write) -> fmt::Result {
        write_header(token, out)?;
        match self.name_of(token) {
            Some(name) => out.write_str(name),
            None => write_value(token, out),
        }
    }
}

impl Lexicon {
    /// Render a token with this lexicon's renderer, or the default one
    ///
    /// Fails only if the renderer itself reports an error; the built-in renderers never do.
    pub fn render(&self, token: &Token<'_>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let renderer = self.renderer().unwrap_or(&DefaultRenderer);
        renderer.render(token, &mut out)?;
        Ok(out)
    }
}
