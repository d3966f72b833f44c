use crate::Error;
use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    /// Unstage paths, and with `delete` also remove them from the worktree.
    ///
    /// Unless `skip_missing` is set, naming a path that is not staged fails
    /// with `PathNotInIndex` before anything changes. The index is rewritten
    /// with the remaining entries in every other case.
    pub fn remove(&self, paths: &[PathBuf], delete: bool, skip_missing: bool) -> anyhow::Result<()> {
        let mut index = self.load_index()?;

        let names = paths
            .iter()
            .map(|path| self.workspace().relative_name(path))
            .collect::<Result<Vec<_>, _>>()?;

        let missing = paths
            .iter()
            .zip(&names)
            .filter(|(_, name)| index.entry_by_path(name).is_none())
            .map(|(path, _)| path.clone())
            .collect::<Vec<_>>();
        if !missing.is_empty() && !skip_missing {
            return Err(Error::PathNotInIndex(missing).into());
        }

        for name in &names {
            if index.remove(name).is_some() && delete {
                self.workspace().remove_file(name)?;
                tracing::debug!(path = %name, "deleted from worktree");
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
