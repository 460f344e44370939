//! Identifier and cross-reference resolution against a workspace index.

use rstest::rstest;
use xscript::hir::{
    IndexSnapshot, MatchKind, ObjectKind, ResolveResult, Resolver, WorkspaceIndex,
    WorkspaceObject,
};
use xscript::parse;

use crate::helpers::inventory::{index_of, sample_index, sample_inventory};
use crate::helpers::source_fixtures::FUNCTION_WITH_REFS;

fn match_summary(index: &WorkspaceIndex, text: &str) -> Vec<(String, MatchKind)> {
    Resolver::new(index)
        .resolve_identifier(text)
        .into_iter()
        .map(|m| (m.file_path, m.match_kind))
        .collect()
}

#[test]
fn test_single_function_inventory() {
    let index = index_of(&[("functions/auth/validate_token.xs", "function")]);
    let path = "functions/auth/validate_token.xs".to_string();

    assert_eq!(
        match_summary(&index, "validate_token"),
        vec![(path.clone(), MatchKind::Basename)]
    );
    assert_eq!(
        match_summary(&index, "ValidateToken"),
        vec![(path, MatchKind::Sanitized)]
    );
    assert!(match_summary(&index, "nonexistent_thing").is_empty());
}

#[test]
fn test_endpoint_basename_never_matches_sibling_verb() {
    let index = index_of(&[
        ("apis/brands/brands_POST.xs", "api_endpoint"),
        ("apis/brands/brands_GET.xs", "api_endpoint"),
    ]);
    assert_eq!(
        match_summary(&index, "brands_POST"),
        vec![("apis/brands/brands_POST.xs".to_string(), MatchKind::Basename)]
    );
}

#[test]
fn test_same_basename_in_two_folders_is_ambiguous() {
    let index = index_of(&[
        ("functions/discord/get_message_by_id.xs", "function"),
        ("functions/slack/get_message_by_id.xs", "function"),
    ]);
    let matches = match_summary(&index, "get_message_by_id");
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|(_, kind)| *kind == MatchKind::Basename));
}

#[rstest]
#[case("tables/users.xs", MatchKind::Exact, "tables/users.xs")]
#[case("GET /brands/{id}", MatchKind::Endpoint, "apis/brands/brands_id_GET.xs")]
#[case("get /brands/:id", MatchKind::Endpoint, "apis/brands/brands_id_GET.xs")]
#[case("brands_id_get", MatchKind::Sanitized, "apis/brands/brands_id_GET.xs")]
#[case("Auth/ValidateToken", MatchKind::Path, "functions/auth/validate_token.xs")]
#[case("NightlyCleanup", MatchKind::Sanitized, "tasks/nightly_cleanup.xs")]
fn test_strategy_priority(#[case] text: &str, #[case] kind: MatchKind, #[case] path: &str) {
    let index = sample_index();
    assert_eq!(match_summary(&index, text), vec![(path.to_string(), kind)]);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("___")]
#[case("POST /nowhere")]
fn test_unmatched_text_is_empty(#[case] text: &str) {
    assert!(match_summary(&sample_index(), text).is_empty());
}

#[test]
fn test_resolve_endpoint_by_route() {
    let index = sample_index();
    let resolver = Resolver::new(&index);
    assert!(resolver.resolve_endpoint("DELETE", "/brands").is_empty());
    let matches = resolver.resolve_endpoint("post", "/brands/");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "brands_POST");
    assert_eq!(matches[0].kind, ObjectKind::ApiEndpoint);
}

#[test]
fn test_resolve_named_narrows_by_folder() {
    let index = index_of(&[
        ("functions/discord/get_message_by_id.xs", "function"),
        ("functions/slack/get_message_by_id.xs", "function"),
    ]);
    let resolver = Resolver::new(&index);

    let result = resolver.resolve_named("Discord/GetMessageByID", &ObjectKind::Function);
    assert_eq!(
        result.object().map(|o| o.path.as_str()),
        Some("functions/discord/get_message_by_id.xs")
    );

    let result = resolver.resolve_named("GetMessageByID", &ObjectKind::Function);
    assert!(result.is_ambiguous());
    assert!(matches!(
        resolver.resolve_named("GetMessageByID", &ObjectKind::Table),
        ResolveResult::NotFound
    ));
}

#[test]
fn test_resolve_all_refs_of_a_document() {
    let index = sample_index();
    let result = parse(FUNCTION_WITH_REFS);
    let resolved =
        Resolver::new(&index).resolve_all_refs(&result.db_refs(), &result.function_run_refs());

    assert_eq!(resolved.db.get(&0).map(String::as_str), Some("tables/users.xs"));
    assert_eq!(resolved.db.get(&1).map(String::as_str), Some("tables/orders.xs"));
    assert_eq!(
        resolved.function_runs.get(&0).map(String::as_str),
        Some("functions/auth/validate_token.xs")
    );
}

#[test]
fn test_db_ref_to_function_does_not_resolve() {
    let index = index_of(&[("functions/users.xs", "function")]);
    let result = parse("function f {\n  stack {\n    db.get users {\n    }\n  }\n}");
    let resolved = Resolver::new(&index).resolve_all_refs(&result.db_refs(), &[]);
    assert!(resolved.db.is_empty());
}

#[test]
fn test_snapshot_reload_resolves_identically() {
    let fresh = sample_index();
    let json = fresh.snapshot().to_json().expect("serialize");
    let snapshot = IndexSnapshot::from_json(&json).expect("deserialize");
    assert!(snapshot.matches_inventory(&sample_inventory()));
    let reloaded = WorkspaceIndex::from_snapshot(snapshot).expect("reload");

    for text in [
        "validate_token",
        "ValidateToken",
        "brands_POST",
        "GET /brands/{id}",
        "Auth/ValidateToken",
        "users",
        "nonexistent_thing",
    ] {
        assert_eq!(
            Resolver::new(&fresh).resolve_identifier(text),
            Resolver::new(&reloaded).resolve_identifier(text),
            "{}",
            text
        );
    }
}

#[test]
fn test_repeated_path_replaces_earlier_entry() {
    let index = WorkspaceIndex::build(vec![
        WorkspaceObject::new(1, "tables/users.xs", "table"),
        WorkspaceObject::new(2, "tables/users.xs", "table").with_hash("new"),
    ]);
    assert_eq!(index.len(), 1);
    let users = index.get("tables/users.xs").expect("users");
    assert_eq!((users.id, users.content_hash.as_str()), (2, "new"));
}

#[rstest]
#[case("Slack/GetMessageByID", None)]
#[case("Discord/GetMessageByID", Some("functions/discord/get_message_by_id.xs"))]
#[case("Functions/Discord/GetMessageByID", Some("functions/discord/get_message_by_id.xs"))]
#[case("GetMessageByID", Some("functions/discord/get_message_by_id.xs"))]
fn test_function_run_folders_must_match_path(#[case] name: &str, #[case] expected: Option<&str>) {
    let index = index_of(&[("functions/discord/get_message_by_id.xs", "function")]);
    let result = parse(&format!("function f {{\n  stack {{\n    function.run \"{}\" {{\n    }}\n  }}\n}}", name));
    let resolved = Resolver::new(&index).resolve_all_refs(&[], &result.function_run_refs());
    assert_eq!(resolved.function_runs.get(&0).map(String::as_str), expected);

    let by_identifier = Resolver::new(&index).resolve_identifier(name);
    assert_eq!(by_identifier.is_empty(), expected.is_none());
}
