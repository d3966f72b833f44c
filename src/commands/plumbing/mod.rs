//! Plumbing commands (low-level object and index access)
//!
//! ## Commands
//!
//! - `cat-file`: Print an object's payload
//! - `hash-object`: Compute an object ID and optionally store the object
//! - `ls-files`: List the index
//! - `ls-tree`: List the contents of a tree object
//! - `rev-parse`: Resolve a name to an object ID
//! - `show-ref`: List references
//! - `write-tree`: Store the index as tree objects

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod write_tree;
