//! Language-independent helpers shared by the parser and the workspace index.

pub mod text_utils;

pub use text_utils::{sanitize_name, sanitize_segments, unquote};
