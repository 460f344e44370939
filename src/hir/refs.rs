//! Reference extraction: four independent read-only passes over tokens.
//!
//! ```text
//! db.query users { ... } as $rows        → DbRef { query, users }
//! function.run "Discord/GetMessage" ...  → FunctionRunRef
//! math.add $a { value = 1 }              → FunctionCallRef (function)
//! $name|trim                             → FunctionCallRef (filter), VariableRef
//! ```
//!
//! None of the passes re-lex the text, and none knows whether the referenced
//! object exists. Resolution happens in [`crate::hir::resolve`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::Position;
use crate::core::unquote;
use crate::parser::blocks::{next_significant, prev_significant};
use crate::parser::{Scheme, Token, TokenKind};

// ============================================================================
// REFERENCE TYPES
// ============================================================================

/// Whether a call site invokes a function or applies a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Function,
    Filter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallRef {
    pub name: SmolStr,
    pub line: u32,
    pub column: u32,
    pub kind: CallKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRef {
    /// Includes the `$` sigil.
    pub name: SmolStr,
    pub line: u32,
    pub column: u32,
}

/// `db.<operation> <table>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbRef {
    pub operation: SmolStr,
    pub table: String,
    pub line: u32,
    pub column: u32,
}

/// `function.run "<name>"`. The name may contain `/` folder separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRunRef {
    pub name: String,
    pub line: u32,
    pub column: u32,
}

macro_rules! impl_position {
    ($($ty:ty),*) => {
        $(impl $ty {
            pub fn position(&self) -> Position {
                Position::new(self.line, self.column)
            }
        })*
    };
}

impl_position!(FunctionCallRef, VariableRef, DbRef, FunctionRunRef);

// ============================================================================
// FUNCTION AND FILTER CALLS
// ============================================================================

/// Words that start statements without being calls.
const NON_CALL_WORDS: &[&str] = &[
    "as", "true", "false", "null", "if", "elseif", "else", "each", "try", "catch", "finally",
    "then",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockContext {
    Code,
    Declaration,
}

/// Every function call site and filter application, in source order, one
/// entry per distinct `(name, line, column)`.
pub fn extract_function_calls(tokens: &[Token]) -> Vec<FunctionCallRef> {
    let mut seen = FxHashSet::default();
    let mut calls = Vec::new();
    let mut push = |token: &Token, kind: CallKind| {
        if seen.insert((token.text.clone(), token.line, token.column)) {
            calls.push(FunctionCallRef {
                name: token.text.clone(),
                line: token.line,
                column: token.column,
                kind,
            });
        }
    };

    let mut blocks: Vec<BlockContext> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LBrace => {
                let context = if blocks.last() == Some(&BlockContext::Declaration)
                    || opens_declaration_block(tokens, i)
                {
                    BlockContext::Declaration
                } else {
                    BlockContext::Code
                };
                blocks.push(context);
            }
            TokenKind::RBrace => {
                blocks.pop();
            }
            TokenKind::Ident => {
                if is_filter_position(tokens, i) {
                    push(token, CallKind::Filter);
                } else if blocks.last() != Some(&BlockContext::Declaration)
                    && is_call_site(tokens, i)
                {
                    push(token, CallKind::Function);
                }
            }
            _ => {}
        }
    }
    calls
}

/// `input {`, `schema {` and their labelled forms.
fn opens_declaration_block(tokens: &[Token], open: usize) -> bool {
    let Some(mut prev) = prev_significant(tokens, open) else {
        return false;
    };
    if tokens[prev].kind == TokenKind::String {
        match prev_significant(tokens, prev) {
            Some(p) => prev = p,
            None => return false,
        }
    }
    let token = &tokens[prev];
    token.kind == TokenKind::Ident && is_declaration_block(&token.text)
}

/// Directly after `|`, or the first entry of a `filters=` list.
fn is_filter_position(tokens: &[Token], index: usize) -> bool {
    let Some(prev) = prev_significant(tokens, index) else {
        return false;
    };
    match tokens[prev].kind {
        TokenKind::Pipe => true,
        TokenKind::Eq => prev_significant(tokens, prev).is_some_and(|p| tokens[p].is_ident("filters")),
        _ => false,
    }
}

fn is_call_site(tokens: &[Token], index: usize) -> bool {
    let token = &tokens[index];
    let name = token.text.as_str();
    if NON_CALL_WORDS.contains(&name) || Scheme::from_keyword(name).is_some() || is_section_name(name) {
        return false;
    }

    // Statement start: first on its line, or after a brace or `;`.
    let starts_statement = match prev_significant(tokens, index) {
        None => true,
        Some(prev) => {
            let prev = &tokens[prev];
            prev.line < token.line
                || matches!(
                    prev.kind,
                    TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semicolon
                )
        }
    };
    if !starts_statement {
        return false;
    }

    let Some(next) = next_significant(tokens, index + 1, tokens.len()) else {
        return false;
    };
    let next = &tokens[next];
    match next.kind {
        TokenKind::LBrace => true,
        TokenKind::LParen => next.line == token.line,
        kind if kind.is_argument() => next.line == token.line,
        _ => false,
    }
}

/// A block whose contents are declarations in some scheme (`input`, `schema`).
fn is_declaration_block(name: &str) -> bool {
    Scheme::ALL
        .iter()
        .any(|scheme| scheme.grammar().declaration_block == Some(name))
}

fn is_section_name(name: &str) -> bool {
    Scheme::ALL
        .iter()
        .any(|scheme| scheme.grammar().knows_section(name))
}

// ============================================================================
// VARIABLES
// ============================================================================

/// Every `$name` occurrence, including the head of `$input.a`.
pub fn extract_variable_refs(tokens: &[Token]) -> Vec<VariableRef> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Variable)
        .map(|t| VariableRef {
            name: t.text.clone(),
            line: t.line,
            column: t.column,
        })
        .collect()
}

// ============================================================================
// DATABASE AND FUNCTION-RUN REFERENCES
// ============================================================================

/// The token following `call` on the same line, when it has one of `kinds`.
fn same_line_argument<'t>(tokens: &'t [Token], call: usize, kinds: &[TokenKind]) -> Option<&'t Token> {
    let next = &tokens[next_significant(tokens, call + 1, tokens.len())?];
    (next.line == tokens[call].line && kinds.contains(&next.kind)).then_some(next)
}

/// `db.<operation> table` and `db.<operation> "table"`.
pub fn extract_db_refs(tokens: &[Token]) -> Vec<DbRef> {
    let mut refs = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Ident {
            continue;
        }
        let Some(operation) = token.text.strip_prefix("db.") else {
            continue;
        };
        let Some(table) = same_line_argument(tokens, i, &[TokenKind::Ident, TokenKind::String])
        else {
            continue;
        };
        let table = unquote(&table.text).trim().to_string();
        if table.is_empty() {
            continue;
        }
        refs.push(DbRef {
            operation: SmolStr::new(operation),
            table,
            line: token.line,
            column: token.column,
        });
    }
    refs
}

/// `function.run "<name>"`.
pub fn extract_function_run_refs(tokens: &[Token]) -> Vec<FunctionRunRef> {
    let mut refs = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_ident("function.run") {
            continue;
        }
        let Some(target) = same_line_argument(tokens, i, &[TokenKind::String]) else {
            continue;
        };
        let name = unquote(&target.text).trim().to_string();
        if name.is_empty() {
            continue;
        }
        refs.push(FunctionRunRef {
            name,
            line: token.line,
            column: token.column,
        });
    }
    refs
}
