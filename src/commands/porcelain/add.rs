use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::PathBuf;

impl Repository {
    /// Stage regular files, replacing whatever was staged under their names.
    /// Symlinks are refused.
    ///
    /// Every path is checked before anything is written, so one bad path
    /// leaves the index untouched.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let names = paths
            .iter()
            .map(|path| self.workspace().resolve_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut index = self.load_index()?;

        for name in names {
            index.remove(&name);

            let data = self
                .workspace()
                .read_file(&name)
                .with_context(|| format!("unable to read {name}"))?;
            let oid = self.database().store(&Blob::new(data))?;

            let stat = self.workspace().stat_file(&name)?;
            let metadata = EntryMetadata::from_fs(
                &self.workspace().absolute(&name),
                &stat,
                self.config().file_mode,
            );

            index.add(IndexEntry::new(name, oid, metadata));
        }

        index.write_updates()?;

        Ok(())
    }
}
