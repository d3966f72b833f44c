use crate::areas::refs::flatten;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::refs::revision::Revision;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print every tag name, one per line.
    pub fn list_tags(&self) -> anyhow::Result<()> {
        let tags = self.refs().list(Some("tags"))?;
        for (name, _) in flatten(&tags, "") {
            writeln!(self.writer(), "{name}")?;
        }

        Ok(())
    }

    /// Point `refs/tags/<name>` at `target`. An annotated tag first stores a
    /// tag object wrapping the target and points the ref at that instead.
    pub fn create_tag(
        &self,
        name: &str,
        target: &str,
        annotated: Option<(&Author, &str)>,
    ) -> anyhow::Result<ObjectId> {
        let target_oid = Revision::new(target.to_string())
            .find(self, None, true)?
            .with_context(|| format!("not a valid object name: {target}"))?;

        let ref_oid = match annotated {
            Some((tagger, message)) => {
                let target_type = self.database().object_type(&target_oid)?;
                let tag = Tag::new(&target_oid, target_type, name, tagger, message);
                self.database().store(&tag)?
            }
            None => target_oid,
        };

        self.refs().create_ref(&format!("tags/{name}"), &ref_oid)?;

        Ok(ref_oid)
    }
}
