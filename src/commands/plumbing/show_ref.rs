use crate::areas::refs::flatten;
use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print `<oid> <ref>` for every reference under `refs/`.
    pub fn show_ref(&self) -> anyhow::Result<()> {
        let refs = self.refs().list(None)?;

        for (name, oid) in flatten(&refs, "refs") {
            writeln!(self.writer(), "{oid} {name}")?;
        }

        Ok(())
    }
}
