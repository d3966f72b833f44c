use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::areas::workspace::GIT_DIR_NAME;
use crate::artifacts::config::RepositoryConfig;
use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

const DEFAULT_BRANCH: &str = "master";

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

impl Repository {
    /// Create a repository at `path`, creating the directory if needed.
    ///
    /// Fails when `path` is a file, or when it already holds a `.git` that is
    /// not an empty directory.
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if path.exists() && !path.is_dir() {
            return Err(Error::DirectoryConflict {
                path: path.to_path_buf(),
                reason: "is not a directory",
            });
        }
        fs::create_dir_all(path)?;

        let git_dir = path.join(GIT_DIR_NAME);
        if git_dir.exists() {
            if !git_dir.is_dir() {
                return Err(Error::DirectoryConflict {
                    path: git_dir,
                    reason: "is not a directory",
                });
            }
            if fs::read_dir(&git_dir)?.next().is_some() {
                return Err(Error::DirectoryConflict {
                    path: git_dir,
                    reason: "is not empty",
                });
            }
        }

        for dir in ["branches", "objects", "refs/tags", "refs/heads"] {
            fs::create_dir_all(git_dir.join(dir))?;
        }
        fs::write(git_dir.join("description"), DESCRIPTION)?;
        fs::write(
            git_dir.join(HEAD_REF_NAME),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;
        fs::write(
            git_dir.join("config"),
            RepositoryConfig::default().serialize(),
        )?;

        let repository = Self::open(path, writer)?;
        tracing::debug!(path = %repository.git_dir().display(), "initialized repository");
        writeln!(
            repository.writer(),
            "Initialized empty Git repository in {}",
            repository.git_dir().display()
        )?;

        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn sink() -> Box<dyn std::io::Write> {
        Box::new(std::io::sink())
    }

    #[test]
    fn init_writes_head_and_layout() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::init(dir.path(), sink()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
            "ref: refs/heads/master\n"
        );
        for path in ["branches", "objects", "refs/heads", "refs/tags"] {
            assert!(repository.git_path(path).is_dir(), "{path} missing");
        }
        assert!(repository.git_path("description").is_file());
        assert!(!repository.config().bare);
        assert!(!repository.config().file_mode);
    }

    #[test]
    fn init_creates_missing_worktree() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/repo");

        Repository::init(&target, sink()).unwrap();
        assert!(target.join(".git/objects").is_dir());
    }

    #[test]
    fn init_accepts_non_empty_worktree() {
        let dir = TempDir::new().unwrap();
        dir.child("README").write_str("hello").unwrap();

        assert!(Repository::init(dir.path(), sink()).is_ok());
    }

    #[test]
    fn init_refuses_a_file() {
        let dir = TempDir::new().unwrap();
        dir.child("file").write_str("x").unwrap();

        assert!(matches!(
            Repository::init(&dir.path().join("file"), sink()),
            Err(Error::DirectoryConflict { .. })
        ));
    }

    #[test]
    fn init_refuses_non_empty_git_dir() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path(), sink()).unwrap();

        assert!(matches!(
            Repository::init(dir.path(), sink()),
            Err(Error::DirectoryConflict {
                reason: "is not empty",
                ..
            })
        ));
    }
}
