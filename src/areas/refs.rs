//! References (HEAD, branches, tags)
//!
//! References are text files under the git directory holding either:
//! - a 40-character object ID followed by a newline (direct reference)
//! - `ref: <path>` naming another reference (symbolic reference)
//!
//! Writes take an exclusive lock on the ref file; a race between two writers is
//! still last-write-wins.

use crate::artifacts::objects::object_id::ObjectId;
use crate::{Error, Result};
use derive_new::new;
use file_guard::Lock;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Prefix of branch references, relative to the git directory
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Prefix of tag references, relative to the git directory
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Refs below a directory, mirroring its layout.
pub type RefTree = BTreeMap<String, RefNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefNode {
    Ref(ObjectId),
    Tree(RefTree),
}

/// Flatten a ref tree into sorted `(path, oid)` pairs, paths joined with `/`
/// under `prefix` (which may be empty).
pub fn flatten(tree: &RefTree, prefix: &str) -> Vec<(String, ObjectId)> {
    let mut refs = Vec::new();
    let mut pending = vec![(prefix.to_string(), tree)];

    while let Some((prefix, tree)) = pending.pop() {
        for (name, node) in tree {
            let path = match prefix.is_empty() {
                true => name.clone(),
                false => format!("{prefix}/{name}"),
            };
            match node {
                RefNode::Ref(oid) => refs.push((path, oid.clone())),
                RefNode::Tree(subtree) => pending.push((path, subtree)),
            }
        }
    }

    refs.sort();
    refs
}

#[derive(Debug, Clone)]
enum RefContent {
    SymRef(String),
    Oid(ObjectId),
}

impl RefContent {
    fn read(path: &Path) -> Result<Option<RefContent>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        match regex::Regex::new(SYMREF_REGEX)?.captures(content) {
            Some(symref_match) => Ok(Some(RefContent::SymRef(symref_match[1].trim().to_string()))),
            None => Ok(Some(RefContent::Oid(ObjectId::try_parse(content)?))),
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// The git directory, which ref names are relative to
    path: Box<Path>,
}

impl Refs {
    /// Follow `name` (e.g. `HEAD`, `refs/heads/master`) through any symbolic
    /// references down to an object ID. `None` when a file along the way does
    /// not exist.
    pub fn resolve(&self, name: &str) -> Result<Option<ObjectId>> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();

        loop {
            if !visited.insert(current.clone()) {
                return Err(Error::CyclicReference(name.to_string()));
            }

            match RefContent::read(&self.path.join(&current))? {
                Some(RefContent::SymRef(target)) => {
                    tracing::debug!(from = %current, to = %target, "following symbolic ref");
                    current = target;
                }
                Some(RefContent::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(None),
            }
        }
    }

    /// The last reference of the symbolic chain starting at `name`, i.e. the
    /// file that an update of `name` has to write.
    fn current_ref(&self, name: &str) -> Result<String> {
        let mut visited = HashSet::new();
        let mut current = name.to_string();

        while visited.insert(current.clone()) {
            match RefContent::read(&self.path.join(&current))? {
                Some(RefContent::SymRef(target)) => current = target,
                Some(RefContent::Oid(_)) | None => return Ok(current),
            }
        }

        Err(Error::CyclicReference(name.to_string()))
    }

    /// All refs below `refs/` (or `refs/<subpath>`), resolved. Symbolic refs
    /// whose target is missing are left out.
    pub fn list(&self, subpath: Option<&str>) -> Result<RefTree> {
        let root = match subpath {
            Some(subpath) => self.refs_path().join(subpath),
            None => self.refs_path().to_path_buf(),
        };
        let mut tree = RefTree::new();
        if !root.is_dir() {
            return Ok(tree);
        }

        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|error| Error::Io(error.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(self.path.as_ref()) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            let Some(oid) = self.resolve(&relative)? else {
                continue;
            };

            let Ok(below_root) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let components = below_root
                .iter()
                .map(|component| component.to_string_lossy().to_string())
                .collect::<Vec<_>>();
            insert_ref(&mut tree, &components, oid);
        }

        Ok(tree)
    }

    /// Point `refs/<name>` at `oid`.
    pub fn create_ref(&self, name: &str, oid: &ObjectId) -> Result<()> {
        let ref_path = self.refs_path().join(name);
        self.update_ref_file(&ref_path, &format!("{oid}\n"))?;
        tracing::debug!(name, %oid, "created ref");

        Ok(())
    }

    /// Move whatever HEAD points at: the active branch, or HEAD itself when
    /// detached.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        let target = self.current_ref(HEAD_REF_NAME)?;
        self.update_ref_file(&self.path.join(&target), &format!("{oid}\n"))?;
        tracing::debug!(reference = %target, %oid, "updated head");

        Ok(())
    }

    /// Branch named by HEAD, `None` when HEAD is detached.
    pub fn active_branch(&self) -> Result<Option<String>> {
        match RefContent::read(&self.head_path())? {
            Some(RefContent::SymRef(target)) => {
                Ok(target.strip_prefix(HEADS_PREFIX).map(str::to_string))
            }
            Some(RefContent::Oid(_)) | None => Ok(None),
        }
    }

    /// Make HEAD a symbolic reference to `target` (e.g. `refs/heads/master`).
    pub fn set_head(&self, target: &str) -> Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: {target}\n"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().set_len(0)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}

fn insert_ref(tree: &mut RefTree, components: &[String], oid: ObjectId) {
    let Some((leaf, dirs)) = components.split_last() else {
        return;
    };

    let mut node = tree;
    for dir in dirs {
        let child = node
            .entry(dir.clone())
            .or_insert_with(|| RefNode::Tree(RefTree::new()));
        // a file and a directory cannot share a name on disk
        node = match child {
            RefNode::Tree(subtree) => subtree,
            RefNode::Ref(_) => return,
        };
    }

    node.insert(leaf.clone(), RefNode::Ref(oid));
}
