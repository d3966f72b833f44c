use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::refs::revision::Revision;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print the raw payload of the object `name` resolves to, peeled down to
    /// `object_type`.
    pub fn cat_file(&self, object_type: ObjectType, name: &str) -> anyhow::Result<()> {
        let oid = Revision::new(name.to_string())
            .find(self, Some(object_type), true)?
            .with_context(|| format!("not a valid {object_type} name: {name}"))?;

        let payload = self.database().load(&oid)?.serialize()?;
        self.writer().write_all(&payload)?;

        Ok(())
    }
}
