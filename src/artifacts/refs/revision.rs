use crate::areas::refs::{HEAD_REF_NAME, HEADS_PREFIX, TAGS_PREFIX};
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::refs::HEX_REGEX;
use crate::{Error, Result};
use derive_new::new;

/// A name to be resolved against a repository.
///
/// Candidates come from, in order:
/// - `HEAD`, followed through symbolic refs
/// - stored objects whose ID starts with the name, when it looks like hex
/// - `refs/tags/<name>` and `refs/heads/<name>`
#[derive(Debug, Clone, new)]
pub struct Revision {
    name: String,
}

impl Revision {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn is_head(&self) -> bool {
        self.name == HEAD_REF_NAME
    }

    fn looks_like_oid(&self) -> Result<bool> {
        Ok(regex::Regex::new(HEX_REGEX)?.is_match(&self.name))
    }

    /// Every distinct object ID the name could stand for.
    pub fn candidates(&self, repository: &Repository) -> Result<Vec<ObjectId>> {
        let mut candidates = Vec::new();
        let mut push = |oid: ObjectId| {
            if !candidates.contains(&oid) {
                candidates.push(oid);
            }
        };

        if self.name.is_empty() {
            return Ok(Vec::new());
        }

        if self.is_head()
            && let Some(oid) = repository.refs().resolve(HEAD_REF_NAME)?
        {
            push(oid);
        }

        if self.looks_like_oid()? {
            let prefix = self.name.to_ascii_lowercase();
            for oid in repository.database().find_objects_by_prefix(&prefix)? {
                push(oid);
            }
        }

        for prefix in [TAGS_PREFIX, HEADS_PREFIX] {
            let ref_name = format!("{prefix}{}", self.name);
            if repository.refs().exists(&ref_name)
                && let Some(oid) = repository.refs().resolve(&ref_name)?
            {
                push(oid);
            }
        }

        tracing::debug!(name = %self.name, count = candidates.len(), "resolved candidates");
        Ok(candidates)
    }

    /// Resolve to a single object ID.
    ///
    /// With `wanted` set, the object is peeled until it has that type: tags
    /// are followed to their target and commits to their tree (only when a
    /// tree is wanted). Peeling stops at the first object when `follow` is
    /// false. `None` when nothing of the wanted type is reached.
    pub fn find(
        &self,
        repository: &Repository,
        wanted: Option<ObjectType>,
        follow: bool,
    ) -> Result<Option<ObjectId>> {
        if self.name.is_empty() {
            return Ok(None);
        }

        let mut candidates = self.candidates(repository)?;
        let mut oid = match candidates.len() {
            0 if self.is_head() || self.looks_like_oid()? => return Ok(None),
            0 => {
                return Err(Error::AmbiguousReference {
                    name: self.name.clone(),
                    candidates,
                });
            }
            1 => candidates.remove(0),
            _ => {
                return Err(Error::AmbiguousReference {
                    name: self.name.clone(),
                    candidates,
                });
            }
        };

        let Some(wanted) = wanted else {
            return Ok(Some(oid));
        };

        loop {
            let object = repository.database().load(&oid)?;
            if object.object_type() == wanted {
                return Ok(Some(oid));
            }
            if !follow {
                return Ok(None);
            }

            oid = match object {
                ObjectBox::Tag(tag) => tag.target()?,
                ObjectBox::Commit(commit) if wanted == ObjectType::Tree => commit.tree_oid()?,
                _ => return Ok(None),
            };
            tracing::debug!(name = %self.name, %oid, "peeled");
        }
    }
}
