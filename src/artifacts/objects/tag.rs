//! Annotated tag object
//!
//! Same KVLM layout as commits, with `object`, `type`, `tag` and `tagger`
//! headers followed by the tag message.

use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::kvlm::Kvlm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::{Error, Result};
use bytes::Bytes;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    kvlm: Kvlm,
}

impl Tag {
    pub fn new(
        target: &ObjectId,
        target_type: ObjectType,
        name: &str,
        tagger: &Author,
        message: &str,
    ) -> Self {
        let mut kvlm = Kvlm::new();
        kvlm.set("object", target.to_string());
        kvlm.set("type", target_type.as_str());
        kvlm.set("tag", name.to_string());
        kvlm.set("tagger", tagger.display());
        kvlm.set_message(format!("{}\n", message.trim()));

        Tag { kvlm }
    }

    pub fn kvlm(&self) -> &Kvlm {
        &self.kvlm
    }

    /// The object the tag points at
    pub fn target(&self) -> Result<ObjectId> {
        let object = self
            .kvlm
            .get_str("object")
            .ok_or_else(|| Error::MalformedObject("tag without object".into()))?;
        ObjectId::try_parse(object)
    }

    pub fn name(&self) -> Option<&str> {
        self.kvlm.get_str("tag")
    }
}

impl Packable for Tag {
    fn serialize(&self) -> Result<Bytes> {
        self.kvlm.serialize()
    }
}

impl Unpackable for Tag {
    fn deserialize(payload: Bytes) -> Result<Self> {
        Ok(Tag {
            kvlm: Kvlm::deserialize(payload)?,
        })
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }
}
