//! Built-in function and filter documentation.
//!
//! The bundled corpus is decoded once, on first use of
//! [`DocRegistry::global`]. Tests and tools that need their own entries build
//! isolated registries with [`DocRegistry::from_entries`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::text_utils::truncate_with_ellipsis;

const BUILTIN_DOCS: &str = include_str!("../../data/builtin_docs.json");

static GLOBAL: LazyLock<DocRegistry> = LazyLock::new(|| {
    DocRegistry::from_json(BUILTIN_DOCS).unwrap_or_else(|err| {
        tracing::warn!("failed to decode built-in documentation: {}", err);
        DocRegistry::default()
    })
});

/// Documentation for one built-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Full dotted name (`db.query`, `trim`).
    pub name: String,
    /// Markdown body.
    pub body: String,
}

impl DocEntry {
    pub fn summary(&self) -> Option<String> {
        summarize(&self.body, DocRegistry::SUMMARY_WIDTH)
    }
}

/// Immutable name → documentation map.
#[derive(Debug, Clone, Default)]
pub struct DocRegistry {
    entries: BTreeMap<String, DocEntry>,
}

impl DocRegistry {
    /// Display width of [`DocRegistry::summary`], ellipsis included.
    pub const SUMMARY_WIDTH: usize = 80;

    /// The registry built from the bundled corpus.
    pub fn global() -> &'static DocRegistry {
        &GLOBAL
    }

    /// Decode a `[{"name": ..., "body": ...}]` corpus.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<DocEntry> = serde_json::from_str(text)?;
        Ok(Self::from_entries(entries))
    }

    /// Later entries with the same name replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = DocEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DocEntry> {
        self.entries.get(name)
    }

    /// Entries whose name starts with `prefix`, sorted by name.
    pub fn search_prefix(&self, prefix: &str) -> Vec<&DocEntry> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, entry)| entry)
            .collect()
    }

    /// First prose line of `name`'s documentation, at most
    /// [`Self::SUMMARY_WIDTH`] characters.
    pub fn summary(&self, name: &str) -> Option<String> {
        self.summary_with_width(name, Self::SUMMARY_WIDTH)
    }

    pub fn summary_with_width(&self, name: &str, width: usize) -> Option<String> {
        summarize(&self.get(name)?.body, width)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First line outside fenced code that is neither blank nor a heading.
pub fn summarize(body: &str, width: usize) -> Option<String> {
    let mut in_fence = false;
    for line in body.lines() {
        let line = line.trim();
        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || line.is_empty() || line.starts_with('#') {
            continue;
        }
        return Some(truncate_with_ellipsis(line, width));
    }
    None
}
