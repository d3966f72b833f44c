use crate::Error;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::refs::revision::Revision;
use anyhow::Context;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const EXECUTABLE_MODE: &str = "100755";

impl Repository {
    /// Write the tree of `name` (a commit, tag or tree) out to `target`, which
    /// must be missing or an empty directory.
    pub fn checkout(&self, name: &str, target: &Path) -> anyhow::Result<()> {
        let tree_oid = Revision::new(name.to_string())
            .find(self, Some(ObjectType::Tree), true)?
            .with_context(|| format!("{name} does not name a tree"))?;

        if target.exists() {
            if !target.is_dir() {
                return Err(Error::DirectoryConflict {
                    path: target.to_path_buf(),
                    reason: "is not a directory",
                }
                .into());
            }
            if std::fs::read_dir(target)?.next().is_some() {
                return Err(Error::DirectoryConflict {
                    path: target.to_path_buf(),
                    reason: "is not empty",
                }
                .into());
            }
        }
        std::fs::create_dir_all(target)?;

        let mut pending: Vec<(ObjectId, PathBuf)> = vec![(tree_oid, target.to_path_buf())];
        while let Some((tree_oid, dir)) = pending.pop() {
            let tree = self
                .database()
                .load(&tree_oid)?
                .into_tree()
                .with_context(|| format!("{tree_oid} is not a tree"))?;

            for leaf in tree.leaves() {
                let path = dir.join(&leaf.path);

                match leaf.object_type() {
                    Some(ObjectType::Tree) => {
                        std::fs::create_dir(&path)?;
                        pending.push((leaf.oid.clone(), path));
                    }
                    Some(ObjectType::Blob) => {
                        let blob = self
                            .database()
                            .load(&leaf.oid)?
                            .into_blob()
                            .with_context(|| format!("{} is not a blob", leaf.oid))?;
                        std::fs::write(&path, blob.data())?;
                        if leaf.mode == EXECUTABLE_MODE {
                            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
                        }
                    }
                    // submodules are left as empty directories
                    Some(ObjectType::Commit) => std::fs::create_dir(&path)?,
                    _ => tracing::warn!(path = %path.display(), mode = %leaf.mode, "skipping unknown tree entry"),
                }
            }
        }

        Ok(())
    }
}
