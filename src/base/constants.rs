//! Domain constants shared across the engine.

/// Extension of materialized workspace script files (without the dot).
pub const SCRIPT_EXTENSION: &str = "xs";

/// Version tag of the persisted workspace index snapshot.
///
/// Bump whenever the snapshot shape or the derived-key rules (basename,
/// sanitizing, endpoint patterns) change.
pub const SNAPSHOT_VERSION: u32 = 1;

/// HTTP verbs recognised in endpoint file names and `verb=` attributes.
pub const HTTP_VERBS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
