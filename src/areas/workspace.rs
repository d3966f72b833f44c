//! Working tree access
//!
//! Paths handed to staging operations are resolved here against the worktree
//! root. Index entry names are the `/`-separated paths relative to that root.

use crate::{Error, Result};
use bytes::Bytes;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

/// Name of the metadata directory inside the worktree
pub const GIT_DIR_NAME: &str = ".git";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    /// `path` must already be canonical.
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index name of an existing regular file. Symlinks are not followed.
    pub fn resolve_file(&self, path: &Path) -> Result<String> {
        let name = self.relative_name(path)?;
        match std::fs::symlink_metadata(self.absolute(&name)) {
            Ok(metadata) if metadata.is_file() => Ok(name),
            _ => Err(Error::NotAFile(path.to_path_buf())),
        }
    }

    /// Index name of `path`, which need not exist.
    pub fn relative_name(&self, path: &Path) -> Result<String> {
        let absolute = Self::normalize(path)?;
        let relative = absolute
            .strip_prefix(&self.path)
            .map_err(|_| Error::PathOutsideWorktree(path.to_path_buf()))?;

        let components = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        if components.is_empty() || components.iter().any(|component| component == GIT_DIR_NAME) {
            return Err(Error::PathOutsideWorktree(path.to_path_buf()));
        }

        Ok(components.join("/"))
    }

    /// Absolute form of `path` with `.` and `..` folded away. Only the parent
    /// directory is canonicalized, so a symlink in the last component keeps
    /// its own name.
    fn normalize(path: &Path) -> Result<PathBuf> {
        let mut lexical = PathBuf::new();
        for component in std::path::absolute(path)?.components() {
            match component {
                Component::ParentDir => {
                    lexical.pop();
                }
                Component::CurDir => {}
                other => lexical.push(other),
            }
        }

        match (lexical.parent(), lexical.file_name()) {
            (Some(parent), Some(file_name)) => match parent.canonicalize() {
                Ok(parent) => Ok(parent.join(file_name)),
                Err(_) => Ok(lexical),
            },
            _ => Ok(lexical),
        }
    }

    pub fn absolute(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn read_file(&self, name: &str) -> Result<Bytes> {
        Ok(std::fs::read(self.absolute(name))?.into())
    }

    pub fn stat_file(&self, name: &str) -> Result<Metadata> {
        Ok(std::fs::metadata(self.absolute(name))?)
    }

    /// Delete a file from the worktree. A file that is already gone is fine.
    pub fn remove_file(&self, name: &str) -> Result<()> {
        match std::fs::remove_file(self.absolute(name)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
