//! Index (staging area)
//!
//! Holds the entries staged for the next commit, keyed and ordered by path.
//! The whole file is read at the start of an operation and rewritten at the end.
//! Reads take a shared lock on the index file and writes an exclusive one, but
//! nothing guards the read-modify-write sequence as a whole, so two concurrent
//! writers still race (last one wins).

use crate::areas::database::Database;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{ENTRY_BLOCK, HEADER_SIZE};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{TREE_MODE, Tree, TreeLeaf};
use crate::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
    entries: BTreeMap<String, IndexEntry>,
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Replace the in-memory entries with the content of the index file.
    ///
    /// A missing file and one that does not parse both give an empty index.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.is_file() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = Vec::new();
        lock.deref_mut().read_to_end(&mut content)?;
        drop(lock);

        if content.is_empty() {
            return Ok(());
        }

        match Self::parse(content.into()) {
            Ok(entries) => self.entries = entries,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "ignoring unreadable index");
            }
        }

        Ok(())
    }

    fn parse(content: Bytes) -> Result<BTreeMap<String, IndexEntry>> {
        let mut reader = Checksum::new(Cursor::new(content));

        let header = IndexHeader::deserialize(reader.read(HEADER_SIZE)?)?;
        header.validate()?;

        let mut entries = BTreeMap::new();
        for _ in 0..header.entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?.to_vec();

            // records end with at least one NUL on a block boundary
            while entry_bytes.last() != Some(&0) {
                entry_bytes.extend_from_slice(&reader.read(ENTRY_BLOCK)?);
            }

            let entry = IndexEntry::deserialize(Bytes::from(entry_bytes))?;
            entries.insert(entry.name.clone(), entry);
        }

        reader.verify()?;

        Ok(entries)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn entry_by_path(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage an entry, replacing any entry with the same path as well as
    /// entries that would clash with it in a tree (a file where one of its
    /// parent directories was, or a directory's content where it now is).
    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry.name);
        tracing::debug!(path = %entry.name, oid = %entry.oid, "staged");

        self.entries.insert(entry.name.clone(), entry);
        self.changed = true;
    }

    fn discard_conflicts(&mut self, name: &str) {
        let mut parent = name;
        while let Some((dir, _)) = parent.rsplit_once('/') {
            self.entries.remove(dir);
            parent = dir;
        }

        let children_prefix = format!("{name}/");
        self.entries
            .retain(|path, _| !path.starts_with(&children_prefix));
    }

    /// Unstage a path. Returns the removed entry, if there was one.
    pub fn remove(&mut self, name: &str) -> Option<IndexEntry> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            self.changed = true;
        }

        removed
    }

    /// Rewrite the index file from scratch.
    pub fn write_updates(&mut self) -> Result<()> {
        let mut writer = Checksum::new(Vec::new());
        writer.write(&IndexHeader::for_entries(self.entries.len() as u32).serialize()?)?;
        for entry in self.entries.values() {
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;
        let content = writer.into_inner();

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;
        lock.deref_mut().set_len(0)?;
        lock.deref_mut().write_all(&content)?;

        tracing::debug!(entries = self.entries.len(), "index written");
        self.changed = false;

        Ok(())
    }

    /// Store one tree object per directory named by the entries and return
    /// the digest of the root tree.
    ///
    /// Directories are built deepest first, so every subtree digest is known
    /// before its parent is assembled.
    pub fn write_tree(&self, database: &Database) -> Result<ObjectId> {
        let mut directories: BTreeMap<String, Vec<TreeLeaf>> = BTreeMap::new();
        directories.insert(String::new(), Vec::new());

        for entry in self.entries.values() {
            let mut dir = entry.parent_dir();
            directories.entry(dir.to_string()).or_default().push(TreeLeaf::new(
                entry.metadata.mode.tree_mode(),
                entry.basename().to_string(),
                entry.oid.clone(),
            ));

            while let Some((parent, _)) = dir.rsplit_once('/') {
                directories.entry(parent.to_string()).or_default();
                dir = parent;
            }
        }

        let mut paths = directories.keys().cloned().collect::<Vec<_>>();
        paths.sort_by_key(|path| std::cmp::Reverse(path.len()));

        let mut root = None;
        for path in paths {
            let leaves = directories.remove(&path).unwrap_or_default();
            let tree_oid = database.store(&Tree::new(leaves))?;

            match path.rsplit_once('/') {
                _ if path.is_empty() => root = Some(tree_oid),
                Some((parent, name)) => directories
                    .entry(parent.to_string())
                    .or_default()
                    .push(TreeLeaf::new(TREE_MODE.into(), name.to_string(), tree_oid)),
                None => directories
                    .entry(String::new())
                    .or_default()
                    .push(TreeLeaf::new(TREE_MODE.into(), path.clone(), tree_oid)),
            }
        }

        // the root is always present and always processed last
        root.ok_or_else(|| Error::MalformedObject("index produced no root tree".into()))
    }
}
