//! Project I/O: script files and index snapshots on disk.
//!
//! Everything else in the crate is pure; this module is where paths are
//! read and written.

pub mod file_loader;
pub mod snapshot_store;

pub use file_loader::{LoadError, analyze_directory, collect_script_paths, load_and_parse};
pub use snapshot_store::{IndexSource, StoreError, load_or_rebuild, read_snapshot, write_snapshot};
