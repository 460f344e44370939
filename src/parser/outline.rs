//! Object outline: the header line and the top-level sections of the body
//!
//! ```text
//! query "brands/{id}" verb=GET {     ← header (keyword, name, verb)
//!   input { ... }                    ← section with block
//!   stack { ... }                    ← section with block
//!   response = $brand                ← section by assignment
//! }
//! ```

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::blocks::{Statement, block_end, next_significant, statements};
use super::lexer::Token;
use super::token_kind::TokenKind;
use crate::base::Position;
use crate::core::unquote;

/// The object declaration line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHeader {
    pub keyword: SmolStr,
    /// Object name, quote-stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Upper-cased `verb=` attribute (endpoints only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<SmolStr>,
    pub line: u32,
    pub column: u32,
}

/// A top-level section of the object body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: SmolStr,
    /// Quoted label between the name and the block (`test "adds" { }`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub line: u32,
    pub column: u32,
    /// Token index of the opening brace, for block sections.
    #[serde(skip)]
    pub open: Option<usize>,
    /// Token index of the closing brace; `None` when the block is unterminated.
    #[serde(skip)]
    pub close: Option<usize>,
    pub terminated: bool,
}

impl Section {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn has_block(&self) -> bool {
        self.open.is_some()
    }

    /// Token range strictly inside the braces (to end of input if unterminated).
    pub fn body(&self, token_count: usize) -> Option<(usize, usize)> {
        let open = self.open?;
        Some((open + 1, self.close.unwrap_or(token_count)))
    }
}

/// Header plus sections of one document.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub header: Option<ObjectHeader>,
    /// Token range of the object body.
    pub body: (usize, usize),
    pub sections: Vec<Section>,
}

/// Build the outline. With no recognised keyword the whole document is
/// scanned as a body, so fragments like `input { int a }` still work.
pub fn outline(tokens: &[Token], keyword_index: Option<usize>) -> Outline {
    let Some(kw) = keyword_index else {
        return Outline {
            header: None,
            body: (0, tokens.len()),
            sections: sections(tokens, 0, tokens.len()),
        };
    };

    let (header, open) = header(tokens, kw);
    let body = match open {
        Some(open) => (
            open + 1,
            block_end(tokens, open).unwrap_or(tokens.len()),
        ),
        None => (tokens.len(), tokens.len()),
    };
    Outline {
        header: Some(header),
        body,
        sections: sections(tokens, body.0, body.1),
    }
}

/// Read `KEYWORD NAME attr=value ... {`, returning the header and the index
/// of the body's opening brace.
fn header(tokens: &[Token], kw: usize) -> (ObjectHeader, Option<usize>) {
    let keyword = &tokens[kw];
    let mut header = ObjectHeader {
        keyword: keyword.text.clone(),
        name: None,
        verb: None,
        line: keyword.line,
        column: keyword.column,
    };

    let mut i = kw + 1;
    while let Some(idx) = next_significant(tokens, i, tokens.len()) {
        let token = &tokens[idx];
        match token.kind {
            TokenKind::LBrace => return (header, Some(idx)),
            TokenKind::Ident | TokenKind::String if header.name.is_none() => {
                header.name = Some(unquote(&token.text));
            }
            TokenKind::Ident if token.text == "verb" => {
                let value = next_significant(tokens, idx + 1, tokens.len())
                    .filter(|&eq| tokens[eq].kind == TokenKind::Eq)
                    .and_then(|eq| next_significant(tokens, eq + 1, tokens.len()));
                if let Some(v) = value {
                    header.verb = Some(SmolStr::new(unquote(&tokens[v].text).to_ascii_uppercase()));
                    i = v + 1;
                    continue;
                }
            }
            _ => {}
        }
        i = idx + 1;
    }
    (header, None)
}

fn sections(tokens: &[Token], start: usize, end: usize) -> Vec<Section> {
    statements(tokens, start, end)
        .iter()
        .filter_map(|stmt| section(tokens, stmt))
        .collect()
}

/// `NAME ["label"] { ... }` or `NAME = value`.
fn section(tokens: &[Token], stmt: &Statement) -> Option<Section> {
    let mut sig = stmt.significant(tokens);
    let name_idx = sig.next()?;
    let name = &tokens[name_idx];
    if name.kind != TokenKind::Ident {
        return None;
    }

    let mut label = None;
    let mut next = sig.next();
    if let Some(idx) = next.filter(|&i| tokens[i].kind == TokenKind::String) {
        label = Some(unquote(&tokens[idx].text));
        next = sig.next();
    }

    let mut section = Section {
        name: name.text.clone(),
        label,
        line: name.line,
        column: name.column,
        open: None,
        close: None,
        terminated: true,
    };
    match next.map(|i| (i, tokens[i].kind)) {
        Some((open, TokenKind::LBrace)) => {
            section.open = Some(open);
            section.close = block_end(tokens, open);
            section.terminated = section.close.is_some();
            Some(section)
        }
        Some((_, TokenKind::Eq)) if section.label.is_none() => Some(section),
        _ => None,
    }
}
