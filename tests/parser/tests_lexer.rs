//! Lexer tests over realistic documents.

use rstest::rstest;
use xscript::parser::{TokenKind, tokenize};

use crate::helpers::source_fixtures::*;

#[rstest]
#[case(ADD_FUNCTION)]
#[case(FUNCTION_WITH_REFS)]
#[case(BRANDS_ENDPOINT)]
#[case(USERS_TABLE)]
#[case(NIGHTLY_TASK)]
#[case(API_GROUP)]
#[case(TABLE_TRIGGER)]
fn test_well_formed_documents_have_no_error_tokens(#[case] source: &str) {
    let tokens = tokenize(source);
    assert!(!tokens.is_empty());
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Error));
}

#[test]
fn test_token_text_matches_source_slice() {
    for token in tokenize(FUNCTION_WITH_REFS) {
        assert_eq!(
            &FUNCTION_WITH_REFS[token.offset..token.offset + token.text.len()],
            token.text.as_str()
        );
    }
}

#[test]
fn test_positions_are_non_decreasing() {
    let tokens = tokenize(BRANDS_ENDPOINT);
    for pair in tokens.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!((a.line, a.column) < (b.line, b.column));
    }
}

#[rstest]
#[case("db.query", TokenKind::Ident)]
#[case("$input", TokenKind::Variable)]
#[case("\"Auth/ValidateToken\"", TokenKind::String)]
#[case("'single'", TokenKind::String)]
#[case("3.14", TokenKind::Number)]
#[case("// note", TokenKind::Comment)]
#[case("|", TokenKind::Pipe)]
#[case("?", TokenKind::Question)]
#[case("!=", TokenKind::Operator)]
fn test_single_token_kinds(#[case] source: &str, #[case] kind: TokenKind) {
    let tokens = tokenize(source);
    assert_eq!(tokens.len(), 1, "{:?}", tokens);
    assert_eq!(tokens[0].kind, kind);
}

#[test]
fn test_garbage_still_tokenizes() {
    let tokens = tokenize(GARBAGE);
    assert!(tokens.iter().any(|t| t.is_unterminated_string()));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::RBrace));
}

#[test]
fn test_positions_on_one_long_line_follow_offsets() {
    let source = "db.query users $r ".repeat(20_000);
    let tokens = tokenize(&source);
    assert_eq!(tokens.len(), 60_000);
    assert!(tokens.iter().all(|t| t.line == 1));
    assert!(tokens.iter().all(|t| t.column as usize == t.offset + 1));
}
