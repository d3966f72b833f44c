//! Repository storage areas
//!
//! - `database`: Loose object store
//! - `index`: Staging area
//! - `refs`: References (HEAD, branches, tags)
//! - `repository`: Handle tying the areas together
//! - `workspace`: Working tree file access

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
