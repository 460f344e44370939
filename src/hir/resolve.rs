//! Name resolution: mapping identifiers and references to workspace files.
//!
//! # Strategy order
//!
//! [`Resolver::resolve_identifier`] tries a fixed list of strategies and stops
//! at the first one that yields anything:
//!
//! 1. **Exact**: the text is a project-relative path
//! 2. **Basename**: file name without extension
//! 3. **Sanitized**: case and separators ignored (`ValidateToken`)
//! 4. **Endpoint**: `brands_POST` or `POST /brands`
//! 5. **Path**: `/`-separated hierarchy (`Auth/ValidateToken`)
//!
//! A strategy may return several candidates. The resolver never picks one:
//! ambiguity is returned to the caller as a list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::index::{
    ObjectKind, WorkspaceIndex, WorkspaceObject, parse_verb, route_pattern, split_endpoint_name,
};
use super::refs::{DbRef, FunctionRunRef};
use crate::core::text_utils::{file_stem, sanitize_name, sanitize_segments};

// ============================================================================
// RESULTS
// ============================================================================

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Basename,
    Sanitized,
    Endpoint,
    Path,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Basename => "basename",
            MatchKind::Sanitized => "sanitized",
            MatchKind::Endpoint => "endpoint",
            MatchKind::Path => "path",
        }
    }
}

/// A candidate file for an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMatch {
    pub file_path: String,
    /// File name without extension.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub match_kind: MatchKind,
}

impl ResolvedMatch {
    fn new(object: &WorkspaceObject, match_kind: MatchKind) -> Self {
        Self {
            file_path: object.path.clone(),
            name: file_stem(&object.path).to_string(),
            kind: object.kind.clone(),
            match_kind,
        }
    }
}

/// Result of resolving a reference that must name a single object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult<'a> {
    /// Exactly one candidate.
    Found(&'a WorkspaceObject),
    /// Several candidates, none preferred.
    Ambiguous(Vec<&'a WorkspaceObject>),
    NotFound,
}

impl<'a> ResolveResult<'a> {
    fn from_candidates(mut candidates: Vec<&'a WorkspaceObject>) -> Self {
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates.remove(0)),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }

    pub fn object(&self) -> Option<&'a WorkspaceObject> {
        match self {
            ResolveResult::Found(object) => Some(*object),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

/// Resolved paths keyed by each reference's position in its input list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRefs {
    pub db: BTreeMap<usize, String>,
    pub function_runs: BTreeMap<usize, String>,
}

// ============================================================================
// STRATEGIES
// ============================================================================

type Strategy = for<'a> fn(&'a WorkspaceIndex, &str) -> Vec<&'a WorkspaceObject>;

/// Tried in order; the first non-empty result wins.
const STRATEGIES: &[(MatchKind, Strategy)] = &[
    (MatchKind::Exact, by_exact_path),
    (MatchKind::Basename, by_basename),
    (MatchKind::Sanitized, by_sanitized_name),
    (MatchKind::Endpoint, by_endpoint),
    (MatchKind::Path, by_hierarchy),
];

fn by_exact_path<'a>(index: &'a WorkspaceIndex, text: &str) -> Vec<&'a WorkspaceObject> {
    index.get(text).into_iter().collect()
}

fn by_basename<'a>(index: &'a WorkspaceIndex, text: &str) -> Vec<&'a WorkspaceObject> {
    index.lookup_basename(text)
}

fn by_sanitized_name<'a>(index: &'a WorkspaceIndex, text: &str) -> Vec<&'a WorkspaceObject> {
    let key = sanitize_name(text);
    if key.is_empty() {
        return Vec::new();
    }
    index.lookup_sanitized(&key)
}

/// `<name>_<VERB>` or `<VERB> /route`.
fn by_endpoint<'a>(index: &'a WorkspaceIndex, text: &str) -> Vec<&'a WorkspaceObject> {
    if let Some((verb, route)) = text.trim().split_once(char::is_whitespace) {
        if let Some(verb) = parse_verb(verb) {
            return index.lookup_endpoint(verb, &route_pattern(route));
        }
    }
    match split_endpoint_name(text.trim()) {
        Some((verb, pattern)) => index.lookup_endpoint(verb, &pattern),
        None => Vec::new(),
    }
}

fn by_hierarchy<'a>(index: &'a WorkspaceIndex, text: &str) -> Vec<&'a WorkspaceObject> {
    if !text.contains('/') {
        return Vec::new();
    }
    index.lookup_path_suffix(&sanitize_segments(text))
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolver over one immutable index.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    index: &'a WorkspaceIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a WorkspaceIndex) -> Self {
        Self { index }
    }

    /// Resolve free text to every candidate of the first matching strategy.
    pub fn resolve_identifier(&self, text: &str) -> Vec<ResolvedMatch> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        for (kind, strategy) in STRATEGIES {
            let hits = strategy(self.index, text);
            if hits.is_empty() {
                tracing::trace!("[RESOLVE] '{}' no {} match", text, kind.as_str());
                continue;
            }
            tracing::trace!(
                "[RESOLVE] '{}' -> {} {} match(es)",
                text,
                hits.len(),
                kind.as_str()
            );
            return hits
                .into_iter()
                .map(|object| ResolvedMatch::new(object, *kind))
                .collect();
        }
        Vec::new()
    }

    /// Endpoints answering `verb` on `route` (`/brands/{id}`).
    pub fn resolve_endpoint(&self, verb: &str, route: &str) -> Vec<ResolvedMatch> {
        self.index
            .lookup_endpoint(verb, &route_pattern(route))
            .into_iter()
            .map(|object| ResolvedMatch::new(object, MatchKind::Endpoint))
            .collect()
    }

    /// Look up an object of `kind` by a possibly hierarchical name.
    ///
    /// A bare name is matched by sanitized basename. A `Folder/Name` form
    /// only matches objects whose path ends with every given segment.
    pub fn resolve_named(&self, name: &str, kind: &ObjectKind) -> ResolveResult<'a> {
        let segments = sanitize_segments(name);
        let candidates = match segments.as_slice() {
            [] => return ResolveResult::NotFound,
            [last] => self.index.lookup_sanitized(last),
            _ => self.index.lookup_path_suffix(&segments),
        };
        ResolveResult::from_candidates(
            candidates
                .into_iter()
                .filter(|object| &object.kind == kind)
                .collect(),
        )
    }

    /// Path of the table a `db.*` call names, if exactly one matches.
    pub fn resolve_db_ref(&self, db_ref: &DbRef) -> Option<String> {
        self.single_path(&db_ref.table, &ObjectKind::Table)
    }

    /// Path of the function a `function.run` call names, if exactly one matches.
    pub fn resolve_function_run_ref(&self, run_ref: &FunctionRunRef) -> Option<String> {
        self.single_path(&run_ref.name, &ObjectKind::Function)
    }

    fn single_path(&self, name: &str, kind: &ObjectKind) -> Option<String> {
        match self.resolve_named(name, kind) {
            ResolveResult::Found(object) => Some(object.path.clone()),
            ResolveResult::Ambiguous(candidates) => {
                tracing::debug!(
                    "[RESOLVE] {} '{}' is ambiguous ({} candidates)",
                    kind,
                    name,
                    candidates.len()
                );
                None
            }
            ResolveResult::NotFound => None,
        }
    }

    /// Resolve both reference lists, keyed by position in each list.
    pub fn resolve_all_refs(
        &self,
        db_refs: &[DbRef],
        function_run_refs: &[FunctionRunRef],
    ) -> ResolvedRefs {
        let db = db_refs
            .iter()
            .enumerate()
            .filter_map(|(i, r)| Some((i, self.resolve_db_ref(r)?)))
            .collect();
        let function_runs = function_run_refs
            .iter()
            .enumerate()
            .filter_map(|(i, r)| Some((i, self.resolve_function_run_ref(r)?)))
            .collect();
        ResolvedRefs { db, function_runs }
    }
}
