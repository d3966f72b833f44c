//! Commit object
//!
//! Commits are KVLM documents: a `tree`, zero or more `parent` lines, `author` and
//! `committer` identities and a free-text message.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::config::Identity;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::{Error, Result};
use bytes::Bytes;

/// Author, committer or tagger line
///
/// Rendered as `Name <email> <unix-seconds> <±HHMM>`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    identity: Identity,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create an author stamped with the current local time.
    pub fn new(identity: Identity) -> Self {
        Author {
            identity,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        identity: Identity,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            identity,
            timestamp,
        }
    }

    /// Resolve the identity from the environment or the global config files and
    /// honour `GIT_AUTHOR_DATE` when it is set.
    pub fn load() -> Self {
        let identity = Identity::load();
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Author::new_with_timestamp(identity, ts),
            None => Author::new(identity),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.identity,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Format timestamp like `Mon Jan 1 12:34:56 2024 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // "name <email> timestamp timezone", split from the right
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(Error::MalformedObject(format!("invalid author {value:?}")));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| Error::MalformedObject(format!("invalid timestamp in {value:?}")))?;
        let identity = Identity::try_from(parts[2])?;

        let offset = parse_timezone(timezone)
            .ok_or_else(|| Error::MalformedObject(format!("invalid timezone in {value:?}")))?;
        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| Error::MalformedObject(format!("invalid timestamp in {value:?}")))?
            .with_timezone(&offset);

        Ok(Author {
            identity,
            timestamp,
        })
    }
}

/// `+0200` → UTC+2
fn parse_timezone(timezone: &str) -> Option<chrono::FixedOffset> {
    if timezone.len() != 5 || !timezone.is_ascii() {
        return None;
    }

    let (sign, digits) = timezone.split_at(1);
    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;
    let seconds = hours * 3600 + minutes * 60;

    match sign {
        "+" => chrono::FixedOffset::east_opt(seconds),
        "-" => chrono::FixedOffset::west_opt(seconds),
        _ => None,
    }
}

/// Commit object, backed by its KVLM document so unknown headers survive a
/// read/write cycle untouched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    kvlm: Kvlm,
}

impl Commit {
    /// Build a commit. The message is trimmed and terminated with a newline.
    pub fn new(tree_oid: &ObjectId, parents: &[ObjectId], author: &Author, message: &str) -> Self {
        let mut kvlm = Kvlm::new();
        kvlm.set("tree", tree_oid.to_string());
        for parent in parents {
            kvlm.push("parent", parent.to_string());
        }
        kvlm.set("author", author.display());
        kvlm.set("committer", author.display());
        kvlm.set_message(format!("{}\n", message.trim()));

        Commit { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    pub fn tree_oid(&self) -> Result<ObjectId> {
        let tree = self
            .kvlm
            .get_str("tree")
            .ok_or_else(|| Error::MalformedObject("commit without tree".into()))?;
        ObjectId::try_parse(tree)
    }

    pub fn parents(&self) -> Result<Vec<ObjectId>> {
        self.kvlm
            .get_all("parent")
            .iter()
            .map(|parent| {
                let parent = std::str::from_utf8(parent)
                    .map_err(|_| Error::MalformedObject("parent is not UTF-8".into()))?;
                ObjectId::try_parse(parent)
            })
            .collect()
    }

    pub fn author(&self) -> Option<Author> {
        self.kvlm
            .get_str("author")
            .and_then(|author| Author::try_from(author).ok())
    }

    pub fn message(&self) -> String {
        self.kvlm
            .message()
            .map(|message| String::from_utf8_lossy(message).into_owned())
            .unwrap_or_default()
    }

    /// First line of the message
    pub fn short_message(&self) -> String {
        self.message().lines().next().unwrap_or("").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        self.kvlm.serialize()
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> Result<Self> {
        Ok(Commit {
            kvlm: Kvlm::deserialize(payload)?,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
