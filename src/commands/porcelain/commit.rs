use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::refs::revision::Revision;
use std::io::Write;

impl Repository {
    /// Record the staged tree as a new commit on top of HEAD and move the
    /// active branch (or the detached HEAD) to it.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let author = Author::load();
        self.commit_as(message, &author)
    }

    pub fn commit_as(&self, message: &str, author: &Author) -> anyhow::Result<ObjectId> {
        let index = self.load_index()?;
        let tree_oid = index.write_tree(self.database())?;

        let parents = Revision::new(HEAD_REF_NAME.to_string())
            .find(self, None, true)?
            .into_iter()
            .collect::<Vec<_>>();

        let commit = Commit::new(&tree_oid, &parents, author, message);
        let commit_oid = self.database().store(&commit)?;
        self.refs().update_head(&commit_oid)?;

        let branch = self
            .refs()
            .active_branch()?
            .unwrap_or_else(|| "detached HEAD".to_string());
        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_oid)
    }
}
