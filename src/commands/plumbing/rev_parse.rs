use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::refs::revision::Revision;
use std::io::Write;

impl Repository {
    /// Print the object ID `name` resolves to, peeled to `wanted` if given.
    /// Nothing is printed when the name resolves to nothing.
    pub fn rev_parse(&self, name: &str, wanted: Option<ObjectType>) -> anyhow::Result<()> {
        if let Some(oid) = Revision::new(name.to_string()).find(self, wanted, true)? {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }
}
