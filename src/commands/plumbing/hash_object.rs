use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::path::Path;

/// Digest of the file at `path` read as `object_type`. The object is written
/// only when a repository is given.
pub fn hash_object(
    path: &Path,
    object_type: ObjectType,
    repository: Option<&Repository>,
) -> anyhow::Result<ObjectId> {
    let data = std::fs::read(path).with_context(|| format!("unable to read {}", path.display()))?;

    Ok(Database::hash(
        data.into(),
        object_type,
        repository.map(Repository::database),
    )?)
}
