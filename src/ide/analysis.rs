//! AnalysisHost: the composition layer used by `inspect` and `explain`.
//!
//! The host owns the workspace index for one inventory and borrows the
//! documentation registry. Parsing keeps no state: every `inspect` call
//! starts from the text it is given.

use serde::Serialize;

use super::docs::{DocEntry, DocRegistry};
use crate::hir::{
    DbRef, FunctionCallRef, FunctionRunRef, ParseOptions, ParseResult, ResolvedMatch,
    ResolvedRefs, Resolver, VariableRef, WorkspaceIndex, WorkspaceObject, extract_db_refs,
    extract_function_calls, extract_function_run_refs, extract_variable_refs, parse_with,
};

/// Owns the workspace index and answers document and identifier queries.
#[derive(Debug, Clone)]
pub struct AnalysisHost<'d> {
    index: WorkspaceIndex,
    docs: &'d DocRegistry,
}

impl Default for AnalysisHost<'static> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AnalysisHost<'static> {
    /// Create a host over `inventory` using the built-in documentation.
    pub fn new(inventory: impl IntoIterator<Item = WorkspaceObject>) -> Self {
        Self::with_docs(inventory, DocRegistry::global())
    }
}

impl<'d> AnalysisHost<'d> {
    pub fn with_docs(
        inventory: impl IntoIterator<Item = WorkspaceObject>,
        docs: &'d DocRegistry,
    ) -> Self {
        Self {
            index: WorkspaceIndex::build(inventory),
            docs,
        }
    }

    /// Create a host over an index that was already built or loaded.
    pub fn from_index(index: WorkspaceIndex, docs: &'d DocRegistry) -> Self {
        Self { index, docs }
    }

    /// Replace the inventory. The index is rebuilt from scratch.
    pub fn set_inventory(&mut self, inventory: impl IntoIterator<Item = WorkspaceObject>) {
        self.index = WorkspaceIndex::build(inventory);
    }

    pub fn index(&self) -> &WorkspaceIndex {
        &self.index
    }

    pub fn docs(&self) -> &'d DocRegistry {
        self.docs
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.index)
    }

    /// Parse a document, extract every reference and resolve the db and
    /// function-run references against the index.
    pub fn inspect(&self, text: &str, options: &ParseOptions) -> Inspection {
        let parse = parse_with(text, options);
        let db_refs = extract_db_refs(&parse.tokens);
        let function_run_refs = extract_function_run_refs(&parse.tokens);
        let resolved = self
            .resolver()
            .resolve_all_refs(&db_refs, &function_run_refs);

        Inspection {
            function_calls: extract_function_calls(&parse.tokens),
            variable_refs: extract_variable_refs(&parse.tokens),
            db_refs,
            function_run_refs,
            resolved,
            parse,
        }
    }

    /// Documentation and workspace matches for an identifier.
    pub fn explain(&self, identifier: &str) -> Explanation {
        let identifier = identifier.trim();
        let doc = self.docs.get(identifier).cloned();
        let related = if doc.is_none() && !identifier.is_empty() {
            self.docs
                .search_prefix(identifier)
                .into_iter()
                .map(|entry| entry.name.clone())
                .collect()
        } else {
            Vec::new()
        };

        Explanation {
            identifier: identifier.to_string(),
            summary: doc.as_ref().and_then(DocEntry::summary),
            doc,
            related,
            matches: self.resolver().resolve_identifier(identifier),
        }
    }
}

/// Result of [`AnalysisHost::inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub parse: ParseResult,
    pub function_calls: Vec<FunctionCallRef>,
    pub variable_refs: Vec<VariableRef>,
    pub db_refs: Vec<DbRef>,
    pub function_run_refs: Vec<FunctionRunRef>,
    /// Resolved paths keyed by position in `db_refs` / `function_run_refs`.
    pub resolved: ResolvedRefs,
}

impl Inspection {
    /// Db references whose table has no single match.
    pub fn unresolved_db_refs(&self) -> impl Iterator<Item = &DbRef> {
        self.db_refs
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.resolved.db.contains_key(i))
            .map(|(_, r)| r)
    }

    /// Function-run references whose target has no single match.
    pub fn unresolved_function_runs(&self) -> impl Iterator<Item = &FunctionRunRef> {
        self.function_run_refs
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.resolved.function_runs.contains_key(i))
            .map(|(_, r)| r)
    }
}

/// Result of [`AnalysisHost::explain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub identifier: String,
    /// Exact documentation entry, if the identifier is a built-in.
    pub doc: Option<DocEntry>,
    pub summary: Option<String>,
    /// Built-ins sharing the identifier as a prefix, when there is no exact entry.
    pub related: Vec<String>,
    /// Workspace files the identifier resolves to.
    pub matches: Vec<ResolvedMatch>,
}

impl Explanation {
    pub fn is_empty(&self) -> bool {
        self.doc.is_none() && self.related.is_empty() && self.matches.is_empty()
    }
}
