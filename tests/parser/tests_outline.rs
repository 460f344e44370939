//! Header and section outline.

use xscript::parser::{Token, detect_scheme, outline, statements, tokenize};

use crate::helpers::source_fixtures::*;

fn section_names(source: &str) -> Vec<String> {
    let tokens = tokenize(source);
    let detected = detect_scheme(&tokens);
    outline(&tokens, detected.keyword_index)
        .sections
        .into_iter()
        .map(|s| s.name.to_string())
        .collect()
}

#[test]
fn test_endpoint_header() {
    let tokens = tokenize(BRANDS_ENDPOINT);
    let header = outline(&tokens, Some(0)).header.expect("header");
    assert_eq!(header.keyword, "query");
    assert_eq!(header.name.as_deref(), Some("brands/{id}"));
    assert_eq!(header.verb.as_deref(), Some("GET"));
    assert_eq!((header.line, header.column), (1, 1));
}

#[test]
fn test_sections_in_source_order() {
    assert_eq!(
        section_names(ADD_FUNCTION),
        vec!["input", "stack", "response"]
    );
    assert_eq!(section_names(USERS_TABLE), vec!["schema", "index"]);
    assert_eq!(
        section_names(TABLE_TRIGGER),
        vec!["table", "input", "stack", "actions"]
    );
}

#[test]
fn test_unterminated_document_keeps_open_sections() {
    let tokens = tokenize(UNTERMINATED_FUNCTION);
    let outline = outline(&tokens, Some(0));
    let input = &outline.sections[0];
    assert_eq!(input.name, "input");
    assert!(!input.terminated);
    assert!(input.has_block());
}

#[test]
fn test_stack_statements_span_attached_blocks() {
    let tokens: Vec<Token> = tokenize(FUNCTION_WITH_REFS);
    let outline = outline(&tokens, Some(0));
    let stack = outline
        .sections
        .iter()
        .find(|s| s.name == "stack")
        .expect("stack");
    let (start, end) = stack.body(tokens.len()).expect("body");
    let heads: Vec<_> = statements(&tokens, start, end)
        .iter()
        .map(|s| tokens[s.start].text.to_string())
        .collect();
    assert_eq!(heads, vec!["db.get", "function.run", "db.add", "debug.log"]);
}
