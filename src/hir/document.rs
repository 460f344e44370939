//! Per-document analysis entry point.
//!
//! ```text
//! text ─→ tokenize ─→ detect scheme ─→ outline ─→ symbols
//!             │              │             │          │
//!             └──────────────┴─────────────┴──────────┴─→ diagnostics
//! ```
//!
//! [`parse`] never fails. Every problem becomes a [`Diagnostic`] and the
//! result is as complete as the input allows.

use serde::{Deserialize, Serialize};

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::refs::{
    DbRef, FunctionCallRef, FunctionRunRef, VariableRef, extract_db_refs, extract_function_calls,
    extract_function_run_refs, extract_variable_refs,
};
use super::symbols::{SymbolTable, extract_symbols};
use crate::base::Position;
use crate::parser::{
    BraceIssue, ObjectHeader, Scheme, Section, Token, TokenKind, check_braces, detect_scheme,
    outline, tokenize,
};

/// Options for [`parse_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Scheme name that replaces detection (`api`, `table`, `endpoint`, ...).
    pub scheme_override: Option<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme_override = Some(scheme.into());
        self
    }
}

/// Everything known about one document after a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub scheme: Scheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ObjectHeader>,
    /// Top-level sections of the object body, in source order.
    pub blocks: Vec<Section>,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    pub tokens: Vec<Token>,
}

impl ParseResult {
    /// Object name from the header line.
    pub fn name(&self) -> Option<&str> {
        self.header.as_ref()?.name.as_deref()
    }

    /// First block with this name.
    pub fn block(&self, name: &str) -> Option<&Section> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == super::Severity::Error)
    }

    pub fn function_calls(&self) -> Vec<FunctionCallRef> {
        extract_function_calls(&self.tokens)
    }

    pub fn variable_refs(&self) -> Vec<VariableRef> {
        extract_variable_refs(&self.tokens)
    }

    pub fn db_refs(&self) -> Vec<DbRef> {
        extract_db_refs(&self.tokens)
    }

    pub fn function_run_refs(&self) -> Vec<FunctionRunRef> {
        extract_function_run_refs(&self.tokens)
    }
}

/// Parse with scheme detection.
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &ParseOptions::default())
}

/// Parse with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> ParseResult {
    let tokens = tokenize(text);
    let mut diagnostics = DiagnosticCollector::new();

    report_lexer_errors(&tokens, &mut diagnostics);
    report_brace_issues(&tokens, &mut diagnostics);

    let detected = detect_scheme(&tokens);
    let forced = match options.scheme_override.as_deref() {
        Some(name) => {
            let scheme = Scheme::from_name(name);
            if scheme.is_none() {
                diagnostics.unknown_scheme_override(name);
            }
            scheme
        }
        None => None,
    };
    let scheme = forced.unwrap_or(detected.scheme);

    if detected.keyword_index.is_none() && forced.is_none() {
        if let Some(first) = tokens.iter().find(|t| !t.kind.is_trivia()) {
            diagnostics.missing_keyword(first.position());
        }
    }

    let outline = outline(&tokens, detected.keyword_index);
    let grammar = scheme.grammar();
    for section in &outline.sections {
        if !grammar.knows_section(&section.name) {
            diagnostics.unknown_section(section.position(), &section.name, scheme.as_str());
        }
    }

    let symbols = extract_symbols(&tokens, &outline.sections, scheme, &mut diagnostics);

    ParseResult {
        scheme,
        header: outline.header,
        blocks: outline.sections,
        symbols,
        diagnostics: diagnostics.finish(),
        tokens,
    }
}

fn report_lexer_errors(tokens: &[Token], diagnostics: &mut DiagnosticCollector) {
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Error) {
        if token.is_unterminated_string() {
            diagnostics.unterminated_string(token.position());
        } else {
            diagnostics.unexpected_character(token.position(), &token.text);
        }
    }
}

fn report_brace_issues(tokens: &[Token], diagnostics: &mut DiagnosticCollector) {
    for issue in check_braces(tokens) {
        match issue {
            BraceIssue::Unterminated(open) => diagnostics.unterminated_block(position_of(tokens, open)),
            BraceIssue::Unmatched(close) => diagnostics.unmatched_brace(position_of(tokens, close)),
        }
    }
}

fn position_of(tokens: &[Token], index: usize) -> Position {
    tokens
        .get(index)
        .map(Token::position)
        .unwrap_or_else(Position::start)
}
