//! Symbol table building: pure functions over the token array.
//!
//! # Module structure
//!
//! - [`types`]: `SymbolTable`, `InputDecl`, `VarDecl`
//! - [`extract_input`]: typed declarations in `input` / `schema` blocks
//! - [`extract_stack`]: `var` and `as` bindings in `stack` blocks

mod extract_input;
mod extract_stack;
mod types;


pub use types::{InputDecl, SymbolTable, VarDecl};

use crate::hir::diagnostics::DiagnosticCollector;
use crate::parser::{Scheme, Section, Token, TokenKind};

/// Build the symbol table from the sections of one document.
///
/// Only the scheme's declaration block is read as declarations: `input`
/// fills inputs and a table's `schema` fills fields. Schemes with a stack
/// contribute variables. Unterminated sections run to the end of input.
pub fn extract_symbols(
    tokens: &[Token],
    sections: &[Section],
    scheme: Scheme,
    diagnostics: &mut DiagnosticCollector,
) -> SymbolTable {
    let grammar = scheme.grammar();
    let mut table = SymbolTable::new();
    for section in sections {
        let Some((start, end)) = section.body(tokens.len()) else {
            continue;
        };
        let name = section.name.as_str();
        if grammar.declaration_block == Some(name) {
            let target = match name {
                "schema" => &mut table.fields,
                _ => &mut table.inputs,
            };
            extract_input::extract_declarations(tokens, start, end, name, target, diagnostics);
        } else if name == "stack" && grammar.has_stack() {
            extract_stack::extract_vars(tokens, start, end, &mut table.vars);
        }
    }
    table
}

/// Whole-line comments directly above the token at `index`, joined with
/// spaces. A comment that trails code on its line ends the run.
pub(crate) fn comment_above(tokens: &[Token], index: usize) -> Option<String> {
    let mut expected = tokens.get(index)?.line;
    let mut parts = Vec::new();
    let mut i = index;
    while i > 0 {
        i -= 1;
        let comment = &tokens[i];
        if comment.kind != TokenKind::Comment || comment.line + 1 != expected {
            break;
        }
        if i > 0 && tokens[i - 1].line == comment.line {
            break;
        }
        parts.push(comment.text.trim_start_matches('/').trim());
        expected = comment.line;
    }
    parts.reverse();
    let text = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}
