//! Foundation types for the xscript toolchain.
//!
//! This module provides the primitives used throughout the engine:
//! - [`Position`] - 1-based line/column positions
//! - [`LineIndex`] - byte offset to line/column conversion
//! - [`LineCursor`] - the same conversion for in-order offsets
//! - Domain constants (file extension, snapshot version)
//!
//! This module has NO dependencies on other xscript modules.

pub mod constants;
mod position;

pub use position::{LineCursor, LineIndex, Position};
