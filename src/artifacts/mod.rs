//! Git data structures
//!
//! - `config`: INI configuration and user identity
//! - `index`: Index file records and their binary layout
//! - `objects`: Object types (blob, tree, commit, tag) and their codecs
//! - `refs`: Revision names and their resolution

pub mod config;
pub mod index;
pub mod objects;
pub mod refs;
