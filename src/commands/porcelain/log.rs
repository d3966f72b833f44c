use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::refs::revision::Revision;
use anyhow::Context;
use colored::Colorize;
use std::collections::HashSet;
use std::io::Write;

impl Repository {
    /// Print the history reachable from `start`, depth first along every
    /// parent, each commit once.
    pub fn log(&self, start: &str) -> anyhow::Result<()> {
        let start_oid = Revision::new(start.to_string())
            .find(self, Some(ObjectType::Commit), true)?
            .with_context(|| format!("{start} does not name a commit"))?;

        let mut seen = HashSet::new();
        let mut pending = vec![start_oid];

        while let Some(oid) = pending.pop() {
            if !seen.insert(oid.clone()) {
                continue;
            }

            let commit = self
                .database()
                .load(&oid)?
                .into_commit()
                .with_context(|| format!("{oid} is not a commit"))?;
            self.show_commit(&oid, &commit)?;

            // first parent on top of the stack
            pending.extend(commit.parents()?.into_iter().rev());
        }

        Ok(())
    }

    fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        if let Some(author) = commit.author() {
            writeln!(self.writer(), "Author: {}", author.identity())?;
            writeln!(self.writer(), "Date:   {}", author.readable_timestamp())?;
        }
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
