//! Loading and analysing a workspace directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use xscript::hir::{ObjectKind, Resolver, WorkspaceIndex, WorkspaceObject};
use xscript::project::{LoadError, analyze_directory, load_and_parse};

use crate::helpers::source_fixtures::*;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "functions/orders/place_order.xs", FUNCTION_WITH_REFS);
    write(root, "functions/auth/validate_token.xs", ADD_FUNCTION);
    write(root, "apis/brands/brands_id_GET.xs", BRANDS_ENDPOINT);
    write(root, "tables/users.xs", USERS_TABLE);
    write(root, "tables/orders.xs", "table orders {\n  schema {\n    int id\n  }\n}\n");
    write(root, "tasks/nightly_cleanup.xs", NIGHTLY_TASK);
    write(root, "broken/unterminated.xs", UNTERMINATED_FUNCTION);
    write(root, "notes/readme.md", "# not a script");
    dir
}

/// Inventory derived from parsed files: relative path plus the detected scheme.
fn inventory_of(root: &Path) -> Vec<WorkspaceObject> {
    analyze_directory(root)
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(i, (path, result))| {
            let relative = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            WorkspaceObject::new(i as u64 + 1, relative, ObjectKind::from_scheme(result.scheme))
        })
        .collect()
}

#[test]
fn test_analyze_directory_parses_every_script_in_order() {
    let dir = workspace();
    let results = analyze_directory(dir.path()).unwrap();
    assert_eq!(results.len(), 7);

    let paths: Vec<_> = results.iter().map(|(p, _)| p.clone()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);

    let broken = results
        .iter()
        .find(|(p, _)| p.ends_with("broken/unterminated.xs"))
        .map(|(_, r)| r)
        .unwrap();
    assert!(broken.has_errors());
    assert!(broken.symbols.input("a").is_some());
}

#[test]
fn test_inventory_kinds_follow_detected_scheme() {
    let dir = workspace();
    let index = WorkspaceIndex::build(inventory_of(dir.path()));
    let kind_of = |path: &str| index.get(path).map(|o| o.kind.clone());

    assert_eq!(kind_of("tables/users.xs"), Some(ObjectKind::Table));
    assert_eq!(kind_of("apis/brands/brands_id_GET.xs"), Some(ObjectKind::ApiEndpoint));
    assert_eq!(kind_of("tasks/nightly_cleanup.xs"), Some(ObjectKind::Task));
    assert_eq!(kind_of("functions/auth/validate_token.xs"), Some(ObjectKind::Function));
    assert!(!index.contains_path("notes/readme.md"));
}

#[test]
fn test_workspace_refs_resolve_across_files() {
    let dir = workspace();
    let index = WorkspaceIndex::build(inventory_of(dir.path()));
    let result = load_and_parse(&dir.path().join("functions/orders/place_order.xs")).unwrap();

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
fn test_analyze_missing_directory() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        analyze_directory(&dir.path().join("absent")),
        Err(LoadError::NotADirectory(_))
    ));
}

#[test]
fn test_empty_directory_yields_no_results() {
    let dir = TempDir::new().unwrap();
    assert!(analyze_directory(dir.path()).unwrap().is_empty());
}
