//! Object types and codecs
//!
//! Every piece of content is stored as one of four object kinds:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (modes, names and object IDs)
//! - **Commit**: snapshot with metadata (tree, parents, author, message)
//! - **Tag**: annotated reference to another object
//!
//! Commits and tags share the KVLM text layout (`kvlm`). All objects are hashed
//! and stored framed as `<type> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod kvlm;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
