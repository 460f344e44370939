//! Workspace index: lookup structures over the object inventory.
//!
//! Objects live in one vector and every map refers to them by position, so
//! the maps can never disagree about an object. Rebuilding is a pure function
//! of the inventory; the persisted [`IndexSnapshot`] is only a cache of that
//! inventory.
//!
//! ```text
//! functions/auth/validate_token.xs
//!   exact      "functions/auth/validate_token.xs"
//!   basename   "validate_token"
//!   sanitized  "validatetoken"
//!
//! apis/brands/brands_id_GET.xs   (api endpoints only)
//!   endpoint   ("GET", "brands_id")
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::base::constants::{HTTP_VERBS, SNAPSHOT_VERSION};
use crate::core::text_utils::{file_stem, sanitize_name, sanitize_segments, strip_extension};
use crate::parser::Scheme;

// ============================================================================
// INVENTORY TYPES
// ============================================================================

/// Object type of an inventory entry.
///
/// Serialises as its plain type string; unknown strings survive as
/// [`ObjectKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Function,
    Table,
    ApiEndpoint,
    ApiGroup,
    Task,
    TableTrigger,
    Other(String),
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Function => "function",
            ObjectKind::Table => "table",
            ObjectKind::ApiEndpoint => "api_endpoint",
            ObjectKind::ApiGroup => "api_group",
            ObjectKind::Task => "task",
            ObjectKind::TableTrigger => "table_trigger",
            ObjectKind::Other(other) => other,
        }
    }

    /// The object kind a document of `scheme` materialises as.
    pub fn from_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Function => ObjectKind::Function,
            Scheme::Api => ObjectKind::ApiEndpoint,
            Scheme::Db => ObjectKind::Table,
            Scheme::Task => ObjectKind::Task,
            Scheme::ApiGroup => ObjectKind::ApiGroup,
            Scheme::TableTrigger => ObjectKind::TableTrigger,
        }
    }
}

impl From<String> for ObjectKind {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "function" => ObjectKind::Function,
            "table" | "db" => ObjectKind::Table,
            "api_endpoint" | "endpoint" | "api" | "query" => ObjectKind::ApiEndpoint,
            "api_group" => ObjectKind::ApiGroup,
            "task" => ObjectKind::Task,
            "table_trigger" | "trigger" => ObjectKind::TableTrigger,
            _ => ObjectKind::Other(value),
        }
    }
}

impl From<&str> for ObjectKind {
    fn from(value: &str) -> Self {
        ObjectKind::from(value.to_string())
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked local file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceObject {
    pub id: u64,
    /// Project-relative path, `/`-separated.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub content_hash: String,
}

impl WorkspaceObject {
    pub fn new(id: u64, path: impl Into<String>, kind: impl Into<ObjectKind>) -> Self {
        Self {
            id,
            path: path.into(),
            kind: kind.into(),
            content_hash: String::new(),
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = hash.into();
        self
    }

    /// File name without extension.
    pub fn basename(&self) -> &str {
        file_stem(&self.path)
    }
}

// ============================================================================
// ENDPOINT KEYS
// ============================================================================

/// The canonical upper-case form of an HTTP verb.
pub fn parse_verb(text: &str) -> Option<&'static str> {
    HTTP_VERBS
        .iter()
        .copied()
        .find(|verb| verb.eq_ignore_ascii_case(text))
}

/// `brands_id_GET` → `("GET", "brands_id")`.
pub fn split_endpoint_name(name: &str) -> Option<(&'static str, String)> {
    let (pattern, verb) = name.rsplit_once('_')?;
    let verb = parse_verb(verb)?;
    if pattern.is_empty() {
        return None;
    }
    Some((verb, pattern.to_lowercase()))
}

/// `/brands/{id}` → `brands_id`, matching the endpoint file-naming convention.
pub fn route_pattern(route: &str) -> String {
    route
        .split('/')
        .map(|segment| {
            segment
                .trim()
                .trim_start_matches(':')
                .trim_matches(|c| c == '{' || c == '}')
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

// ============================================================================
// INDEX
// ============================================================================

type ObjectIdx = usize;

/// Read-only lookup view over one inventory.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceIndex {
    objects: Vec<WorkspaceObject>,
    by_path: FxHashMap<String, ObjectIdx>,
    by_basename: FxHashMap<String, Vec<ObjectIdx>>,
    by_sanitized: FxHashMap<String, Vec<ObjectIdx>>,
    by_endpoint: FxHashMap<(&'static str, String), Vec<ObjectIdx>>,
    /// Sanitized segments of each path without extension, parallel to `objects`.
    segments: Vec<Vec<String>>,
}

impl WorkspaceIndex {
    /// Build every lookup structure in one pass. A repeated path replaces the
    /// earlier entry.
    pub fn build(inventory: impl IntoIterator<Item = WorkspaceObject>) -> Self {
        let mut index = Self::default();
        for object in inventory {
            match index.by_path.get(&object.path) {
                Some(&existing) => index.objects[existing] = object,
                None => {
                    index.by_path.insert(object.path.clone(), index.objects.len());
                    index.objects.push(object);
                }
            }
        }

        for (idx, object) in index.objects.iter().enumerate() {
            let basename = object.basename();
            index
                .by_basename
                .entry(basename.to_string())
                .or_default()
                .push(idx);

            let sanitized = sanitize_name(basename);
            if !sanitized.is_empty() {
                index.by_sanitized.entry(sanitized).or_default().push(idx);
            }

            if object.kind == ObjectKind::ApiEndpoint {
                if let Some(key) = split_endpoint_name(basename) {
                    index.by_endpoint.entry(key).or_default().push(idx);
                }
            }

            index
                .segments
                .push(sanitize_segments(strip_extension(&object.path)));
        }

        tracing::debug!(
            objects = index.objects.len(),
            endpoints = index.by_endpoint.len(),
            "built workspace index"
        );
        index
    }

    /// Rebuild from a snapshot, rejecting other versions.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self, SnapshotError> {
        snapshot.check_version()?;
        Ok(Self::build(snapshot.objects))
    }

    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            version: SNAPSHOT_VERSION,
            objects: self.objects.clone(),
        }
    }

    /// Objects in inventory order.
    pub fn objects(&self) -> &[WorkspaceObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&WorkspaceObject> {
        self.by_path.get(path).map(|&idx| &self.objects[idx])
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn lookup_basename(&self, basename: &str) -> Vec<&WorkspaceObject> {
        self.collect(self.by_basename.get(basename))
    }

    /// Objects whose sanitized basename equals `key` (already sanitized).
    pub fn lookup_sanitized(&self, key: &str) -> Vec<&WorkspaceObject> {
        self.collect(self.by_sanitized.get(key))
    }

    /// Endpoints for a canonical verb and lower-case pattern.
    pub fn lookup_endpoint(&self, verb: &str, pattern: &str) -> Vec<&WorkspaceObject> {
        let Some(verb) = parse_verb(verb) else {
            return Vec::new();
        };
        self.collect(self.by_endpoint.get(&(verb, pattern.to_lowercase())))
    }

    /// Objects whose sanitized path (without extension) ends with `segments`.
    pub fn lookup_path_suffix(&self, segments: &[String]) -> Vec<&WorkspaceObject> {
        if segments.is_empty() {
            return Vec::new();
        }
        self.objects
            .iter()
            .zip(&self.segments)
            .filter(|(_, path)| path.ends_with(segments))
            .map(|(object, _)| object)
            .collect()
    }

    fn collect(&self, indices: Option<&Vec<ObjectIdx>>) -> Vec<&WorkspaceObject> {
        indices
            .map(|ids| ids.iter().map(|&idx| &self.objects[idx]).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<WorkspaceObject> for WorkspaceIndex {
    fn from_iter<I: IntoIterator<Item = WorkspaceObject>>(iter: I) -> Self {
        Self::build(iter)
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Errors decoding a persisted index snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot version {found} does not match expected version {expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Versioned serialization of the inventory an index was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub version: u32,
    pub objects: Vec<WorkspaceObject>,
}

impl IndexSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and check the version tag.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: IndexSnapshot = serde_json::from_str(text)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::VersionMismatch {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            })
        }
    }

    /// Whether the snapshot covers exactly the paths of `inventory`.
    pub fn matches_inventory(&self, inventory: &[WorkspaceObject]) -> bool {
        let mut cached: Vec<&str> = self.objects.iter().map(|o| o.path.as_str()).collect();
        let mut current: Vec<&str> = inventory.iter().map(|o| o.path.as_str()).collect();
        cached.sort_unstable();
        cached.dedup();
        current.sort_unstable();
        current.dedup();
        cached == current
    }
}
