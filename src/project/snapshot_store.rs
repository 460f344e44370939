//! Persisted index snapshots.
//!
//! A snapshot is a cache of the inventory an index was built from. It is
//! accepted only when its version matches and it covers exactly the current
//! inventory's paths. Object data always comes from the inventory, so a
//! snapshot with stale hashes or types never leaks into the index.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::hir::{IndexSnapshot, SnapshotError, WorkspaceIndex, WorkspaceObject};

/// Errors reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where a loaded index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    Snapshot,
    Rebuilt,
}

/// Write the index's snapshot, creating parent directories.
pub fn write_snapshot(path: &Path, index: &WorkspaceIndex) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let json = index.snapshot().to_json()?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}

/// Read and version-check a snapshot.
pub fn read_snapshot(path: &Path) -> Result<IndexSnapshot, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(IndexSnapshot::from_json(&text)?)
}

/// Build the index for `inventory`, reporting whether the snapshot at `path`
/// was current for it.
///
/// The snapshot only decides the [`IndexSource`]. Hashes and types are taken
/// from `inventory` either way.
pub fn load_or_rebuild(
    path: &Path,
    inventory: Vec<WorkspaceObject>,
) -> (WorkspaceIndex, IndexSource) {
    let source = match read_snapshot(path) {
        Ok(snapshot) if snapshot.matches_inventory(&inventory) => IndexSource::Snapshot,
        Ok(_) => {
            tracing::debug!("snapshot at {} is stale", path.display());
            IndexSource::Rebuilt
        }
        Err(err) => {
            tracing::debug!("no usable snapshot: {}", err);
            IndexSource::Rebuilt
        }
    };
    (WorkspaceIndex::build(inventory), source)
}
