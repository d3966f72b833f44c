use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::ModeType;
use std::io::Write;

impl Repository {
    /// List staged paths, with their stat data when `verbose` is set.
    pub fn ls_files(&self, verbose: bool) -> anyhow::Result<()> {
        let index = self.load_index()?;
        let mut writer = self.writer();

        if verbose {
            writeln!(
                writer,
                "Index file format v2, containing {} entries.",
                index.len()
            )?;
        }

        for entry in index.entries() {
            writeln!(writer, "{}", entry.name)?;
            if !verbose {
                continue;
            }

            let metadata = &entry.metadata;
            writeln!(
                writer,
                "  {} with perms: {:o}",
                kind_name(metadata.mode.kind),
                metadata.mode.perms
            )?;
            writeln!(writer, "  on blob: {}", entry.oid)?;
            writeln!(
                writer,
                "  created: {}.{}, modified: {}.{}",
                metadata.ctime, metadata.ctime_nsec, metadata.mtime, metadata.mtime_nsec
            )?;
            writeln!(writer, "  device: {}, inode: {}", metadata.dev, metadata.ino)?;
            writeln!(writer, "  user: {}  group: {}", metadata.uid, metadata.gid)?;
            writeln!(writer, "  size: {}", metadata.size)?;
            writeln!(
                writer,
                "  flags: stage={} assume_valid={}",
                metadata.stage, metadata.assume_valid
            )?;
        }

        Ok(())
    }
}

fn kind_name(kind: ModeType) -> &'static str {
    match kind {
        ModeType::Regular => "regular file",
        ModeType::Symlink => "symlink",
        ModeType::Gitlink => "git link",
    }
}
