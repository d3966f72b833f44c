//! Command implementations
//!
//! Each command is an inherent method on [`Repository`](crate::areas::repository::Repository)
//! that writes its output to the repository's writer.
//!
//! - `plumbing`: Low-level object, index and reference access
//! - `porcelain`: User-facing version control workflows

pub mod plumbing;
pub mod porcelain;
