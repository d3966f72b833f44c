//! Index file format
//!
//! The index (also called staging area or cache) records the files that make up
//! the next commit together with enough stat data to notice when they change.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - 62 fixed bytes of metadata, then the NUL-terminated path
//!   - Each entry padded to 8-byte alignment
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are big-endian.

pub mod checksum;
pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// The only index format version understood here
pub const VERSION: u32 = 2;

/// Size of the fixed part of an entry, up to and including the flags word
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Block size for entry alignment
pub const ENTRY_BLOCK: usize = 8;

/// Name lengths at or above this value are stored as the value itself
pub const MAX_NAME_LENGTH: usize = 0x0FFF;
