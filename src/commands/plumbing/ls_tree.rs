use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeLeaf;
use crate::artifacts::refs::revision::Revision;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// List a tree as `<mode> <type> <oid>\t<path>`. With `recursive`,
    /// subtrees are expanded in place instead of listed.
    pub fn ls_tree(&self, name: &str, recursive: bool) -> anyhow::Result<()> {
        let tree_oid = Revision::new(name.to_string())
            .find(self, Some(ObjectType::Tree), true)?
            .with_context(|| format!("not a tree object: {name}"))?;

        let mut pending = self.tree_leaves(&tree_oid, "")?;
        while let Some((path, leaf)) = pending.pop() {
            let object_type = leaf.object_type();

            if recursive && object_type == Some(ObjectType::Tree) {
                pending.extend(self.tree_leaves(&leaf.oid, &path)?);
                continue;
            }

            let kind = object_type.map(|kind| kind.as_str()).unwrap_or("unknown");
            writeln!(self.writer(), "{} {} {}\t{}", leaf.mode, kind, leaf.oid, path)?;
        }

        Ok(())
    }

    /// Leaves of a tree with their full paths, reversed so they pop off a
    /// stack in tree order.
    fn tree_leaves(
        &self,
        tree_oid: &ObjectId,
        prefix: &str,
    ) -> anyhow::Result<Vec<(String, TreeLeaf)>> {
        let tree = self
            .database()
            .load(tree_oid)?
            .into_tree()
            .with_context(|| format!("{tree_oid} is not a tree"))?;

        let mut leaves = tree
            .into_leaves()
            .map(|leaf| {
                let path = match prefix.is_empty() {
                    true => leaf.path.clone(),
                    false => format!("{prefix}/{}", leaf.path),
                };
                (path, leaf)
            })
            .collect::<Vec<_>>();
        leaves.reverse();

        Ok(leaves)
    }
}
