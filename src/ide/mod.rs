//! IDE features: high-level APIs for CLI and editor consumers.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take data in, return data out
//! 2. **No output formatting**: consumers render the returned structs
//! 3. **Composable**: built on top of HIR parsing and resolution
//!
//! ## Usage
//!
//! ```
//! use xscript::hir::{ParseOptions, WorkspaceObject};
//! use xscript::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(vec![WorkspaceObject::new(1, "tables/users.xs", "table")]);
//! let inspection = host.inspect("db.query users {\n}", &ParseOptions::default());
//! assert_eq!(inspection.resolved.db[&0], "tables/users.xs");
//! ```

mod analysis;
mod docs;

pub use analysis::{AnalysisHost, Explanation, Inspection};
pub use docs::{DocEntry, DocRegistry, summarize};
