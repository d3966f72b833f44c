//! Name resolution
//!
//! Turns user-supplied names (`HEAD`, branch and tag names, full or abbreviated
//! object IDs) into object IDs, peeling tags and commits when a particular
//! object type is wanted.

pub mod revision;

/// Hex strings of this shape may be abbreviated object IDs
pub const HEX_REGEX: &str = r"^[0-9A-Fa-f]{4,40}$";
