//! Repository handle
//!
//! Ties together the worktree, the `.git` metadata directory and the stores
//! living in it. Every operation receives the handle explicitly; nothing is
//! cached between invocations besides what the handle itself holds.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::areas::workspace::{GIT_DIR_NAME, Workspace};
use crate::artifacts::config::RepositoryConfig;
use crate::{Error, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Directories and files every repository must have
const REQUIRED_DIRS: [&str; 3] = ["objects", "refs/heads", "refs/tags"];
const REQUIRED_FILES: [&str; 2] = [HEAD_REF_NAME, "config"];

pub struct Repository {
    worktree: Box<Path>,
    git_dir: Box<Path>,
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose worktree is exactly `path`.
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let worktree = path
            .canonicalize()
            .map_err(|_| Error::NotARepository(path.to_path_buf()))?;
        let git_dir = worktree.join(GIT_DIR_NAME);
        if !git_dir.is_dir() {
            return Err(Error::NotARepository(path.to_path_buf()));
        }

        let layout_ok = REQUIRED_DIRS.iter().all(|dir| git_dir.join(dir).is_dir())
            && REQUIRED_FILES.iter().all(|file| git_dir.join(file).is_file());
        if !layout_ok {
            return Err(Error::NotARepository(path.to_path_buf()));
        }

        let config = RepositoryConfig::from_file(&git_dir.join("config"))?;
        if config.repository_format_version != 0 {
            return Err(Error::UnsupportedFormatVersion(
                config.repository_format_version,
            ));
        }

        Ok(Repository {
            database: Database::new(git_dir.join("objects").into_boxed_path()),
            workspace: Workspace::new(worktree.clone().into_boxed_path()),
            refs: Refs::new(git_dir.clone().into_boxed_path()),
            worktree: worktree.into_boxed_path(),
            git_dir: git_dir.into_boxed_path(),
            config,
            writer: RefCell::new(writer),
        })
    }

    /// Open the closest repository containing `start`, looking at `start`
    /// itself and then each of its parents.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let start = start
            .canonicalize()
            .map_err(|_| Error::NotARepository(start.to_path_buf()))?;

        let mut candidate: Option<&Path> = Some(&start);
        while let Some(dir) = candidate {
            if dir.join(GIT_DIR_NAME).is_dir() {
                tracing::debug!(worktree = %dir.display(), "found repository");
                return Self::open(dir, writer);
            }
            candidate = dir.parent();
        }

        Err(Error::NotARepository(start))
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn git_path(&self, name: &str) -> PathBuf {
        self.git_dir.join(name)
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Index freshly read from disk.
    pub fn load_index(&self) -> Result<Index> {
        let mut index = Index::new(self.git_path("index").into_boxed_path());
        index.rehydrate()?;
        Ok(index)
    }
}
