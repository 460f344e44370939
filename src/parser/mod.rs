//! Lexer and structural scanner for the workspace scripting language
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → flat Vec<Token> with 1-based positions
//!     ↓
//! Scheme detection → first keyword picks function/api/db/...
//!     ↓
//! Outline → header + top-level sections (brace-depth scanning)
//!     ↓
//! HIR → symbol table, diagnostics, references
//! ```
//!
//! There is no tree: tokens stay in one indexable array and every consumer is
//! a linear scan with local lookahead.

pub mod blocks;
mod lexer;
mod outline;
mod scheme;
mod token_kind;

pub use blocks::{BraceIssue, Statement, block_end, check_braces, statements};
pub use lexer::{Lexer, Token, tokenize};
pub use outline::{ObjectHeader, Outline, Section, outline};
pub use scheme::{DetectedScheme, Scheme, SchemeGrammar, detect_scheme};
pub use token_kind::TokenKind;
