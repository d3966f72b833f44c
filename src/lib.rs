//! Content-addressed object store, staging index and reference resolution
//!
//! The crate is organized in three layers:
//!
//! - `areas`: on-disk stores (object database, index, refs, workspace, repository)
//! - `artifacts`: plain data types and their binary/text codecs
//! - `commands`: operations composed on top of the stores (plumbing and porcelain)

pub mod areas;
pub mod artifacts;
pub mod commands;
mod errors;

pub use errors::{Error, Result};
