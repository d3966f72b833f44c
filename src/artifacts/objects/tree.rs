//! Tree object
//!
//! Trees are directory snapshots: a list of leaves, each naming a blob, a nested
//! tree or a gitlink.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<leaves>`
//! Each leaf: `<mode> <path>\0<20-byte-sha1>`
//!
//! Leaves are written sorted by path, with directories collating as though their
//! name carried a trailing `/`.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

/// Mode recorded for subdirectory leaves.
pub const TREE_MODE: &str = "040000";

/// One entry of a tree object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct TreeLeaf {
    /// Six-digit octal mode, e.g. `100644` or `040000`
    pub mode: String,
    /// Entry name, relative to the containing tree
    pub path: String,
    pub oid: ObjectId,
}

impl TreeLeaf {
    pub fn is_tree(&self) -> bool {
        self.mode.starts_with("04")
    }

    /// Object kind the leaf points at, derived from its mode prefix.
    pub fn object_type(&self) -> Option<ObjectType> {
        match self.mode.get(..2)? {
            "04" => Some(ObjectType::Tree),
            "10" | "12" => Some(ObjectType::Blob),
            "16" => Some(ObjectType::Commit),
            _ => None,
        }
    }

    fn sort_key(&self) -> String {
        if self.is_tree() {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    leaves: Vec<TreeLeaf>,
}

impl Tree {
    pub fn new(leaves: Vec<TreeLeaf>) -> Self {
        Tree { leaves }
    }

    pub fn push(&mut self, leaf: TreeLeaf) {
        self.leaves.push(leaf);
    }

    pub fn leaves(&self) -> &[TreeLeaf] {
        &self.leaves
    }

    pub fn into_leaves(self) -> impl Iterator<Item = TreeLeaf> {
        self.leaves.into_iter()
    }

    /// Leaves in the order they are serialized.
    pub fn sorted_leaves(&self) -> Vec<&TreeLeaf> {
        let mut leaves = self.leaves.iter().collect::<Vec<_>>();
        leaves.sort_by_cached_key(|leaf| leaf.sort_key());
        leaves
    }

    /// Read a single leaf starting at `start`, returning it with the offset of
    /// the next one.
    fn parse_leaf(raw: &[u8], start: usize) -> Result<(TreeLeaf, usize)> {
        let space = find(raw, b' ', start)
            .ok_or_else(|| Error::MalformedObject("tree leaf without mode".into()))?;
        let mode = std::str::from_utf8(&raw[start..space])
            .map_err(|_| Error::MalformedObject("tree leaf mode is not ASCII".into()))?;
        let mode = match mode.len() {
            5 => format!("0{mode}"),
            6 => mode.to_string(),
            _ => {
                return Err(Error::MalformedObject(format!(
                    "invalid tree leaf mode {mode:?}"
                )));
            }
        };
        if !mode.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(Error::MalformedObject(format!(
                "invalid tree leaf mode {mode:?}"
            )));
        }

        let nul = find(raw, b'\0', space + 1)
            .ok_or_else(|| Error::MalformedObject("unterminated tree leaf path".into()))?;
        let path = std::str::from_utf8(&raw[space + 1..nul])
            .map_err(|_| Error::MalformedObject("tree leaf path is not UTF-8".into()))?
            .to_string();
        if !is_valid_leaf_name(&path) {
            return Err(Error::MalformedObject(format!(
                "invalid tree leaf path {path:?}"
            )));
        }

        let end = nul + 1 + RAW_OBJECT_ID_LENGTH;
        let raw_oid: &[u8; RAW_OBJECT_ID_LENGTH] = raw
            .get(nul + 1..end)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| Error::MalformedObject("truncated tree leaf object id".into()))?;

        Ok((TreeLeaf::new(mode, path, ObjectId::from_raw(raw_oid)), end))
    }
}

/// A leaf names one entry of its own directory, never `.`, `..` or the
/// metadata directory.
fn is_valid_leaf_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.eq_ignore_ascii_case(".git")
        && !name.contains('/')
}

fn find(raw: &[u8], needle: u8, from: usize) -> Option<usize> {
    raw.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut tree_bytes = Vec::new();

        for leaf in self.sorted_leaves() {
            write!(tree_bytes, "{} {}\0", leaf.mode, leaf.path)?;
            leaf.oid.write_h40_to(&mut tree_bytes)?;
        }

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let mut leaves = Vec::new();
        let mut position = 0;

        while position < payload.len() {
            let (leaf, next) = Self::parse_leaf(&payload, position)?;
            leaves.push(leaf);
            position = next;
        }

        Ok(Tree { leaves })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
