//! Declaration extraction for `input` and table `schema` blocks.
//!
//! Each statement of the block is matched against
//!
//! ```text
//! TYPE[[]][?] NAME[?] [filters=F1|F2:arg ...] [attr=value ...] [{ BLOCK }]
//! ```
//!
//! Statements that do not fit are skipped with a hint; they never stop the
//! scan.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::comment_above;
use super::types::InputDecl;
use crate::core::unquote;
use crate::hir::diagnostics::DiagnosticCollector;
use crate::parser::{Statement, Token, TokenKind, block_end, statements};

/// Parse every declaration between `start` and `end` into `out`.
pub(crate) fn extract_declarations(
    tokens: &[Token],
    start: usize,
    end: usize,
    block: &str,
    out: &mut IndexMap<String, InputDecl>,
    diagnostics: &mut DiagnosticCollector,
) {
    for stmt in statements(tokens, start, end) {
        let Some((name, decl)) = parse_declaration(tokens, &stmt) else {
            let first = &tokens[stmt.start];
            if first.kind != TokenKind::RBrace {
                diagnostics.unrecognized_declaration(first.position(), block);
            }
            continue;
        };

        if is_enum(&decl.ty) && decl.enum_values.as_ref().is_none_or(|v| v.is_empty()) {
            diagnostics.enum_without_values(decl.position(), &name);
        }
        if out.contains_key(&name) {
            diagnostics.duplicate_declaration(decl.position(), &name);
        }
        out.insert(name, decl);
    }
}

fn is_enum(ty: &str) -> bool {
    ty.trim_end_matches("[]") == "enum"
}

/// Match one statement against the declaration pattern.
fn parse_declaration(tokens: &[Token], stmt: &Statement) -> Option<(String, InputDecl)> {
    let sig: Vec<usize> = stmt.significant(tokens).collect();
    let mut cur = Cursor {
        tokens,
        sig: &sig,
        pos: 0,
    };

    // TYPE
    let type_token = cur.eat(TokenKind::Ident)?;
    if type_token.text.contains('.') {
        return None;
    }
    let mut ty = type_token.text.to_string();
    if cur.at(TokenKind::LBracket) && cur.peek_kind(1) == Some(TokenKind::RBracket) {
        cur.bump();
        cur.bump();
        ty.push_str("[]");
    }
    let nullable = cur.eat(TokenKind::Question).is_some();

    // NAME
    let name_token = cur.peek().filter(|t| matches!(t.kind, TokenKind::Ident | TokenKind::String))?;
    cur.bump();
    let name = unquote(&name_token.text);
    if name.is_empty() {
        return None;
    }
    let optional = cur.eat(TokenKind::Question).is_some();

    let mut decl = InputDecl {
        ty,
        nullable,
        optional,
        filters: None,
        enum_values: None,
        description: comment_above(tokens, stmt.start),
        line: type_token.line,
        column: type_token.column,
    };

    // Attributes and an optional block, in any order.
    while let Some(token) = cur.peek() {
        match token.kind {
            TokenKind::Ident if cur.peek_kind(1) == Some(TokenKind::Eq) => {
                let attr = token.text.clone();
                cur.bump();
                cur.bump();
                if attr == "filters" {
                    decl.filters = Some(cur.filter_list());
                } else {
                    cur.bump();
                }
            }
            TokenKind::LBrace => {
                let open = cur.index()?;
                let close = block_end(tokens, open).unwrap_or(stmt.end).min(stmt.end);
                if is_enum(&decl.ty) {
                    decl.enum_values = enum_values(tokens, open + 1, close);
                }
                cur.skip_past(close);
            }
            _ => cur.bump(),
        }
    }

    Some((name, decl))
}

/// `values = [ ... ]` inside an enum's block.
fn enum_values(tokens: &[Token], start: usize, end: usize) -> Option<Vec<String>> {
    let mut i = start;
    while i < end {
        if tokens[i].is_ident("values") {
            let mut j = i + 1;
            while j < end && tokens[j].kind.is_trivia() {
                j += 1;
            }
            if j < end && tokens[j].kind == TokenKind::Eq {
                return Some(bracket_list(tokens, j + 1, end));
            }
        }
        i += 1;
    }
    None
}

/// Entries of the first `[ ... ]` list at or after `from`.
fn bracket_list(tokens: &[Token], from: usize, end: usize) -> Vec<String> {
    let Some(open) = (from..end).find(|&i| tokens[i].kind == TokenKind::LBracket) else {
        return Vec::new();
    };
    tokens[open + 1..end]
        .iter()
        .take_while(|t| t.kind != TokenKind::RBracket)
        .filter(|t| matches!(t.kind, TokenKind::String | TokenKind::Ident | TokenKind::Number))
        .map(|t| unquote(&t.text).trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Walks the significant tokens of one statement.
struct Cursor<'t> {
    tokens: &'t [Token],
    sig: &'t [usize],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn index(&self) -> Option<usize> {
        self.sig.get(self.pos).copied()
    }

    fn peek(&self) -> Option<&'t Token> {
        self.index().map(|i| &self.tokens[i])
    }

    fn peek_kind(&self, ahead: usize) -> Option<TokenKind> {
        self.sig.get(self.pos + ahead).map(|&i| self.tokens[i].kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, kind: TokenKind) -> Option<&'t Token> {
        let token = self.peek().filter(|t| t.kind == kind)?;
        self.bump();
        Some(token)
    }

    /// Move to the first significant token after token index `close`.
    fn skip_past(&mut self, close: usize) {
        while self.index().is_some_and(|i| i <= close) {
            self.bump();
        }
    }

    /// `trim|min:1|max:"x"` → `[trim, min, max]`
    fn filter_list(&mut self) -> Vec<SmolStr> {
        let mut names = Vec::new();
        loop {
            let Some(name) = self.eat(TokenKind::Ident) else {
                break;
            };
            names.push(name.text.clone());
            while self.at(TokenKind::Colon) {
                self.bump();
                if self.peek().is_some_and(|t| t.kind.is_argument()) {
                    self.bump();
                }
            }
            if self.eat(TokenKind::Pipe).is_none() {
                break;
            }
        }
        names
    }
}
