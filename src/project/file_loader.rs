//! Reading script files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::base::constants::SCRIPT_EXTENSION;
use crate::hir::{ParseResult, parse};

/// Errors reading scripts from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error while reading a file or directory.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a script.
    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whether `path` has the script extension.
pub fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION)
}

/// Read a script file's contents.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    if !is_script(path) {
        return Err(LoadError::UnsupportedExtension(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if:
/// - The file has another extension
/// - The file cannot be read
pub fn load_and_parse(path: &Path) -> Result<ParseResult, LoadError> {
    Ok(parse(&load_file(path)?))
}

/// All script files under `dir`, recursively, sorted. Hidden entries are
/// skipped.
pub fn collect_script_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if is_script(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

/// Parse every script under `dir` in parallel, sorted by path.
///
/// Files that cannot be read are logged and left out.
pub fn analyze_directory(dir: &Path) -> Result<Vec<(PathBuf, ParseResult)>, LoadError> {
    let paths = collect_script_paths(dir)?;
    let mut results: Vec<_> = paths
        .par_iter()
        .filter_map(|path| match load_and_parse(path) {
            Ok(result) => Some((path.clone(), result)),
            Err(err) => {
                tracing::warn!("skipping {}: {}", path.display(), err);
                None
            }
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(files = results.len(), "analyzed {}", dir.display());
    Ok(results)
}
