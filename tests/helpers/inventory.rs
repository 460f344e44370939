//! Workspace inventory fixtures.

use xscript::hir::{WorkspaceIndex, WorkspaceObject};

/// A small workspace touching every object kind.
pub fn sample_inventory() -> Vec<WorkspaceObject> {
    let objects = [
        ("functions/auth/validate_token.xs", "function"),
        ("functions/orders/place_order.xs", "function"),
        ("functions/discord/get_message_by_id.xs", "function"),
        ("apis/brands/brands_GET.xs", "api_endpoint"),
        ("apis/brands/brands_POST.xs", "api_endpoint"),
        ("apis/brands/brands_id_GET.xs", "api_endpoint"),
        ("tables/users.xs", "table"),
        ("tables/orders.xs", "table"),
        ("tasks/nightly_cleanup.xs", "task"),
        ("apis/storefront.xs", "api_group"),
        ("triggers/audit_users.xs", "table_trigger"),
    ];
    objects
        .into_iter()
        .enumerate()
        .map(|(i, (path, kind))| {
            WorkspaceObject::new(i as u64 + 1, path, kind).with_hash(format!("hash-{}", i))
        })
        .collect()
}

pub fn sample_index() -> WorkspaceIndex {
    WorkspaceIndex::build(sample_inventory())
}

/// Build an index from `(path, type)` pairs.
pub fn index_of(objects: &[(&str, &str)]) -> WorkspaceIndex {
    WorkspaceIndex::build(
        objects
            .iter()
            .enumerate()
            .map(|(i, (path, kind))| WorkspaceObject::new(i as u64 + 1, *path, *kind)),
    )
}
