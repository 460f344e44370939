//! High-level IR (HIR): per-document analysis and workspace resolution.
//!
//! ## Key Types
//!
//! - [`ParseResult`]: scheme, header, blocks, symbols, diagnostics and tokens
//! - [`SymbolTable`]: declared inputs, table fields and stack variables
//! - [`WorkspaceIndex`]: lookup structures over the object inventory
//! - [`Resolver`]: priority-ordered identifier and reference resolution
//!
//! ## Layers
//!
//! ```text
//! parse(text)                    ← per document, no shared state
//!     │
//!     ├─→ symbols, diagnostics
//!     └─→ extract_*_refs(tokens) ← DbRef, FunctionRunRef, calls, variables
//!                                        │
//! WorkspaceIndex::build(inventory)       │
//!     │                                  ▼
//!     └──────────────→ Resolver::resolve_all_refs
//! ```

mod diagnostics;
mod document;
mod index;
mod refs;
mod resolve;
mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use document::{ParseOptions, ParseResult, parse, parse_with};
pub use index::{
    IndexSnapshot, ObjectKind, SnapshotError, WorkspaceIndex, WorkspaceObject, parse_verb,
    route_pattern, split_endpoint_name,
};
pub use refs::{
    CallKind, DbRef, FunctionCallRef, FunctionRunRef, VariableRef, extract_db_refs,
    extract_function_calls, extract_function_run_refs, extract_variable_refs,
};
pub use resolve::{MatchKind, ResolveResult, ResolvedMatch, ResolvedRefs, Resolver};
pub use symbols::{InputDecl, SymbolTable, VarDecl, extract_symbols};
