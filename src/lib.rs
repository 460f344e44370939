//! # xscript-base
//!
//! Analysis engine for the workspace scripting language: lexing, scheme
//! detection, symbol tables, diagnostics, reference extraction, and
//! workspace-wide name resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Script files and index snapshots on disk
//!   ↓
//! ide       → AnalysisHost (inspect, explain), built-in docs
//!   ↓
//! hir       → ParseResult, symbols, diagnostics, refs, index, resolver
//!   ↓
//! parser    → Logos lexer, scheme detection, block outline
//!   ↓
//! core      → Name sanitizing, literal and path helpers
//!   ↓
//! base      → Positions, line index, constants
//! ```
//!
//! ## Example
//!
//! ```
//! let result = xscript::parse("function add {\n  input {\n    int a\n    int? b?\n  }\n}");
//! assert_eq!(result.name(), Some("add"));
//! assert!(result.symbols.input("a").unwrap().is_required());
//! assert!(!result.symbols.input("b").unwrap().is_required());
//! ```

// ============================================================================
// MODULES (dependency order: base → core → parser → hir → ide → project)
// ============================================================================

/// Foundation types: Position, LineIndex, constants
pub mod base;

/// Text helpers shared by the parser and the index
pub mod core;

/// Parser: Logos lexer, scheme detection, sections
pub mod parser;

/// High-level IR: symbols, diagnostics, references, index, resolution
pub mod hir;

/// IDE features: analysis host, documentation registry
pub mod ide;

/// Project I/O: file loading, snapshot persistence
pub mod project;

// Re-export the entry points
pub use base::{LineCursor, LineIndex, Position};
pub use hir::{ParseOptions, ParseResult, parse, parse_with};
pub use parser::Scheme;
