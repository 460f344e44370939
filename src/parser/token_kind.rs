//! Token kinds for the workspace scripting language
//!
//! The token stream is flat: braces carry no nesting information, consumers
//! track depth themselves.

use serde::{Deserialize, Serialize};

/// All token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (preserved so descriptions can be recovered)
    // =========================================================================
    Comment, // // to end of line

    // =========================================================================
    // NAMES AND LITERALS
    // =========================================================================
    Ident,    // name, or dotted path like db.query
    Variable, // $name
    String,   // "text" or 'text'
    Number,   // 42, 3.14

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    LParen,    // (
    RParen,    // )
    Dot,       // .
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    Eq,        // =
    Question,  // ?
    Pipe,      // |
    Operator,  // ==, !=, +, &&, ...

    // =========================================================================
    // ERRORS
    // =========================================================================
    /// Unterminated string literal or unrecognised character.
    Error,
}

impl TokenKind {
    /// Comments are skipped by every consumer except description recovery.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment)
    }

    /// Tokens that can stand as a positional call argument.
    pub fn is_argument(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Variable | TokenKind::String | TokenKind::Number
        )
    }
}
