//! Stack variable extraction.
//!
//! `var $name[?] { value = EXPR }` declares `$name` with a type inferred from
//! a literal value. `... as $name` binds the result of a call and declares
//! `$name` as `any` unless it is already declared.

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::comment_above;
use super::types::VarDecl;
use crate::parser::blocks::next_significant;
use crate::parser::{Token, TokenKind, block_end};

pub(crate) fn extract_vars(
    tokens: &[Token],
    start: usize,
    end: usize,
    out: &mut IndexMap<String, VarDecl>,
) {
    let mut i = start;
    while i < end {
        let token = &tokens[i];
        if token.kind != TokenKind::Ident {
            i += 1;
            continue;
        }
        let Some(var_idx) =
            next_significant(tokens, i + 1, end).filter(|&v| tokens[v].kind == TokenKind::Variable)
        else {
            i += 1;
            continue;
        };

        match token.text.as_str() {
            "var" => {
                let decl = var_declaration(tokens, i, var_idx, end);
                out.insert(tokens[var_idx].text.to_string(), decl);
            }
            "as" => {
                let var = &tokens[var_idx];
                if let Entry::Vacant(slot) = out.entry(var.text.to_string()) {
                    slot.insert(VarDecl {
                        ty: "any".to_string(),
                        nullable: false,
                        optional: false,
                        description: None,
                        line: var.line,
                        column: var.column,
                    });
                }
            }
            _ => {}
        }
        i = var_idx + 1;
    }
}

fn var_declaration(tokens: &[Token], keyword: usize, var_idx: usize, end: usize) -> VarDecl {
    let var = &tokens[var_idx];
    let mut decl = VarDecl {
        ty: "any".to_string(),
        nullable: false,
        optional: false,
        description: comment_above(tokens, keyword),
        line: var.line,
        column: var.column,
    };

    let mut next = next_significant(tokens, var_idx + 1, end);
    if let Some(q) = next.filter(|&q| tokens[q].kind == TokenKind::Question) {
        decl.optional = true;
        next = next_significant(tokens, q + 1, end);
    }

    if let Some(open) = next.filter(|&o| tokens[o].kind == TokenKind::LBrace) {
        let close = block_end(tokens, open).unwrap_or(end).min(end);
        if let Some(value) = value_of(tokens, open + 1, close) {
            let (ty, nullable) = infer_type(tokens, value, close);
            decl.ty = ty.to_string();
            decl.nullable = nullable;
        }
    }
    decl
}

/// Index of the first token of `value = ...` directly inside the block.
fn value_of(tokens: &[Token], start: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in start..end {
        match tokens[i].kind {
            TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen => depth += 1,
            TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Ident if depth == 0 && tokens[i].text == "value" => {
                let eq = next_significant(tokens, i + 1, end)?;
                if tokens[eq].kind == TokenKind::Eq {
                    return next_significant(tokens, eq + 1, end);
                }
            }
            _ => {}
        }
    }
    None
}

/// Type of a literal value; `(type, nullable)`.
fn infer_type(tokens: &[Token], value: usize, end: usize) -> (&'static str, bool) {
    let token = &tokens[value];
    match token.kind {
        TokenKind::Number => (number_type(&token.text), false),
        TokenKind::Operator if token.text == "-" => next_significant(tokens, value + 1, end)
            .filter(|&n| tokens[n].kind == TokenKind::Number)
            .map_or(("any", false), |n| (number_type(&tokens[n].text), false)),
        TokenKind::String => ("text", false),
        TokenKind::LBrace => ("object", false),
        TokenKind::LBracket => ("array", false),
        TokenKind::Ident => match token.text.as_str() {
            "true" | "false" => ("bool", false),
            "null" => ("any", true),
            _ => ("any", false),
        },
        _ => ("any", false),
    }
}

fn number_type(text: &str) -> &'static str {
    if text.contains(['.', 'e', 'E']) {
        "decimal"
    } else {
        "int"
    }
}
