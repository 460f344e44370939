//! Diagnostics produced by `parse` and `parse_with`.

use rstest::rstest;
use xscript::hir::{Severity, codes};
use xscript::{ParseOptions, Scheme, parse, parse_with};

use crate::helpers::diagnostic_helpers::{assert_clean, assert_positions_valid, codes_of, errors};
use crate::helpers::source_fixtures::*;

#[rstest]
#[case(ADD_FUNCTION)]
#[case(FUNCTION_WITH_REFS)]
#[case(BRANDS_ENDPOINT)]
#[case(USERS_TABLE)]
#[case(NIGHTLY_TASK)]
#[case(API_GROUP)]
#[case(TABLE_TRIGGER)]
fn test_fixtures_parse_cleanly(#[case] source: &str) {
    let result = parse(source);
    assert_clean(&result.diagnostics);
    assert!(!result.has_errors());
}

#[rstest]
#[case("")]
#[case(GARBAGE)]
#[case(UNTERMINATED_FUNCTION)]
#[case("{{{{")]
#[case("}}}}")]
#[case("input { enum? { values = [ }")]
#[case("function { stack { var $ { value = - } } }")]
#[case("\u{feff}función ñ { ✓ }")]
fn test_parse_never_panics_and_is_deterministic(#[case] source: &str) {
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.tokens, second.tokens);
    assert_positions_valid(&first.diagnostics);
}

#[test]
fn test_unterminated_blocks_report_each_open_brace() {
    let result = parse(UNTERMINATED_FUNCTION);
    let unterminated: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.code.as_deref() == Some(codes::UNTERMINATED_BLOCK))
        .map(|d| (d.line, d.column))
        .collect();
    assert_eq!(unterminated, vec![(1, 17), (2, 9)]);

    // Declarations before the cut are still extracted.
    assert!(result.symbols.input("a").is_some());
    assert!(result.symbols.input("b").is_some());
}

#[rstest]
#[case("function f {\n}\n}", codes::UNMATCHED_BRACE, (3, 1))]
#[case("function f {\n  x = \"abc\n}", codes::UNTERMINATED_STRING, (2, 7))]
#[case("function f {\n  x = `\n}", codes::UNEXPECTED_CHARACTER, (2, 7))]
fn test_lexical_and_structural_errors(
    #[case] source: &str,
    #[case] code: &str,
    #[case] position: (u32, u32),
) {
    let result = parse(source);
    let errors = errors(&result.diagnostics);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code.as_deref(), Some(code));
    assert_eq!((errors[0].line, errors[0].column), position);
}

#[test]
fn test_missing_keyword_is_a_hint() {
    let result = parse("\n  input { int a }");
    let hint = &result.diagnostics[0];
    assert_eq!(hint.code.as_deref(), Some(codes::MISSING_KEYWORD));
    assert_eq!(hint.severity, Severity::Hint);
    assert_eq!((hint.line, hint.column), (2, 3));
    assert_eq!(result.scheme, Scheme::Function);
    assert!(result.symbols.input("a").is_some());
}

#[test]
fn test_override_silences_missing_keyword() {
    let result = parse_with("input { int a }", &ParseOptions::new().with_scheme("api"));
    assert_eq!(result.scheme, Scheme::Api);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_unknown_override_falls_back_to_detection() {
    let result = parse_with(USERS_TABLE, &ParseOptions::new().with_scheme("spreadsheet"));
    assert_eq!(result.scheme, Scheme::Db);
    assert_eq!(codes_of(&result.diagnostics), vec![codes::UNKNOWN_SCHEME_OVERRIDE]);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert_eq!(result.symbols.fields.len(), 4);
}

#[test]
fn test_override_changes_section_vocabulary() {
    let result = parse_with(USERS_TABLE, &ParseOptions::new().with_scheme("function"));
    assert_eq!(result.scheme, Scheme::Function);
    assert_eq!(
        codes_of(&result.diagnostics),
        vec![codes::UNKNOWN_SECTION, codes::UNKNOWN_SECTION]
    );
    assert!(result.symbols.fields.is_empty());
}

#[rstest]
#[case("function f {\n  input {\n    = broken\n  }\n}", codes::UNRECOGNIZED_DECLARATION)]
#[case("function f {\n  input {\n    int a\n    text a\n  }\n}", codes::DUPLICATE_DECLARATION)]
#[case("function f {\n  input {\n    enum status\n  }\n}", codes::ENUM_WITHOUT_VALUES)]
#[case("function f {\n  cron {\n  }\n}", codes::UNKNOWN_SECTION)]
fn test_declaration_diagnostics(#[case] source: &str, #[case] code: &str) {
    let result = parse(source);
    assert_eq!(codes_of(&result.diagnostics), vec![code]);
    assert!(!result.has_errors());
}

#[test]
fn test_duplicate_keeps_later_declaration() {
    let result = parse("function f {\n  input {\n    int a\n    text a\n  }\n}");
    let a = result.symbols.input("a").expect("a");
    assert_eq!(a.ty, "text");
    assert_eq!(a.line, 4);
}

#[test]
fn test_garbage_reports_errors_but_returns_tokens() {
    let result = parse(GARBAGE);
    assert!(!result.tokens.is_empty());
    assert!(result.has_errors());
    let found = codes_of(&result.diagnostics);
    assert!(found.contains(&codes::UNMATCHED_BRACE));
    assert!(found.contains(&codes::UNTERMINATED_STRING));
    assert!(found.contains(&codes::UNEXPECTED_CHARACTER));
}
