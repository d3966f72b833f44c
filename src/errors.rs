use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds raised by repository, object, index and ref operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(u32),

    #[error("object {0} does not exist")]
    ObjectNotFound(String),

    #[error("object {oid} is corrupt: {reason}")]
    CorruptObject { oid: String, reason: String },

    #[error("unknown object type {0:?}")]
    UnknownObjectType(String),

    #[error("path is outside of the worktree: {}", .0.display())]
    PathOutsideWorktree(PathBuf),

    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("paths are not in the index: {}", join_paths(.0))]
    PathNotInIndex(Vec<PathBuf>),

    #[error("{}", describe_ambiguity(.name, .candidates))]
    AmbiguousReference {
        name: String,
        candidates: Vec<ObjectId>,
    },

    #[error("{}: {reason}", .path.display())]
    DirectoryConflict { path: PathBuf, reason: &'static str },

    #[error("reference {0} points back at itself")]
    CyclicReference(String),

    #[error("invalid object id {0:?}")]
    InvalidObjectId(String),

    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_ambiguity(name: &str, candidates: &[ObjectId]) -> String {
    if candidates.is_empty() {
        return format!("no such reference {name}");
    }

    let candidates = candidates
        .iter()
        .map(|oid| oid.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    format!("ambiguous reference {name}: candidates are {candidates}")
}
