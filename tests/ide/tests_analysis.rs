//! `inspect` and `explain` through the analysis host.

use xscript::{ParseOptions, Scheme};
use xscript::hir::{MatchKind, WorkspaceObject};
use xscript::ide::{AnalysisHost, DocEntry, DocRegistry};

use crate::helpers::inventory::sample_inventory;
use crate::helpers::source_fixtures::*;

#[test]
fn test_inspect_resolves_refs_against_inventory() {
    let host = AnalysisHost::new(sample_inventory());
    let inspection = host.inspect(FUNCTION_WITH_REFS, &ParseOptions::default());

    assert_eq!(inspection.parse.scheme, Scheme::Function);
    assert_eq!(inspection.parse.name(), Some("Orders/PlaceOrder"));
    assert_eq!(inspection.db_refs.len(), 2);
    assert_eq!(inspection.function_run_refs.len(), 1);
    assert_eq!(inspection.resolved.db.len(), 2);
    assert_eq!(inspection.resolved.function_runs.len(), 1);
    assert_eq!(inspection.unresolved_db_refs().count(), 0);
    assert!(!inspection.function_calls.is_empty());
    assert!(!inspection.variable_refs.is_empty());
}

#[test]
fn test_inspect_without_inventory_leaves_refs_unresolved() {
    let host = AnalysisHost::default();
    let inspection = host.inspect(BRANDS_ENDPOINT, &ParseOptions::default());
    let unresolved: Vec<_> = inspection
        .unresolved_db_refs()
        .map(|r| r.table.as_str())
        .collect();
    assert_eq!(unresolved, vec!["brands"]);
    assert!(inspection.resolved.db.is_empty());
}

#[test]
fn test_inspect_honours_scheme_override() {
    let host = AnalysisHost::default();
    let inspection = host.inspect(
        "input { int id }",
        &ParseOptions::new().with_scheme("endpoint"),
    );
    assert_eq!(inspection.parse.scheme, Scheme::Api);
    assert!(inspection.parse.diagnostics.is_empty());
}

#[test]
fn test_set_inventory_rebuilds_index() {
    let mut host = AnalysisHost::default();
    let inspection = host.inspect(FUNCTION_WITH_REFS, &ParseOptions::default());
    assert_eq!(inspection.unresolved_function_runs().count(), 1);

    host.set_inventory(vec![WorkspaceObject::new(
        9,
        "functions/auth/validate_token.xs",
        "function",
    )]);
    let inspection = host.inspect(FUNCTION_WITH_REFS, &ParseOptions::default());
    assert_eq!(inspection.unresolved_function_runs().count(), 0);
    assert_eq!(host.index().len(), 1);
}

#[test]
fn test_explain_builtin() {
    let host = AnalysisHost::default();
    let explanation = host.explain("db.query");
    assert_eq!(explanation.identifier, "db.query");
    assert!(explanation.doc.is_some());
    assert!(explanation.summary.is_some());
    assert!(explanation.related.is_empty());
    assert!(explanation.matches.is_empty());
}

#[test]
fn test_explain_partial_name_lists_related_builtins() {
    let host = AnalysisHost::default();
    let explanation = host.explain("array.");
    assert!(explanation.doc.is_none());
    assert!(explanation.related.contains(&"array.push".to_string()));
}

#[test]
fn test_explain_workspace_identifier() {
    let host = AnalysisHost::new(sample_inventory());
    let explanation = host.explain("  ValidateToken ");
    assert_eq!(explanation.identifier, "ValidateToken");
    assert!(explanation.doc.is_none());
    assert_eq!(explanation.matches.len(), 1);
    assert_eq!(explanation.matches[0].match_kind, MatchKind::Sanitized);
}

#[test]
fn test_explain_unknown_is_empty() {
    let host = AnalysisHost::new(sample_inventory());
    assert!(host.explain("nonexistent_thing").is_empty());
    assert!(host.explain("").is_empty());
}

#[test]
fn test_explain_with_isolated_docs() {
    let docs = DocRegistry::from_entries([DocEntry {
        name: "validate_token".to_string(),
        body: "Local note.".to_string(),
    }]);
    let host = AnalysisHost::with_docs(sample_inventory(), &docs);
    let explanation = host.explain("validate_token");
    assert_eq!(explanation.summary.as_deref(), Some("Local note."));
    assert_eq!(explanation.matches[0].match_kind, MatchKind::Basename);
    assert!(host.explain("db.query").doc.is_none());
}
