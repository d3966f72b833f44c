//! Loose object database
//!
//! Objects live under `.git/objects/<first-2-hex>/<remaining-38-hex>`, each file
//! holding `zlib(<type> <size>\0<payload>)`.

use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::{Error, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Digest of `data` read as an object of the given type, stored only when
    /// a database is supplied.
    pub fn hash(data: Bytes, object_type: ObjectType, database: Option<&Database>) -> Result<ObjectId> {
        let object = ObjectBox::parse(object_type, data)?;

        match database {
            Some(database) => database.store(&object),
            None => object.object_id(),
        }
    }

    /// Write the object unless a file with its digest already exists.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let framed = object.encode()?;
        let object_id = ObjectId::hash(&framed);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, framed)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Read, inflate and decode an object.
    pub fn load(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.load_raw(object_id)?;
        ObjectBox::parse(object_type, payload)
    }

    /// Object type and undecoded payload.
    pub fn load_raw(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(Error::ObjectNotFound(object_id.to_string()));
        }

        let framed = Self::decompress(std::fs::read(&object_path)?.into()).map_err(|error| {
            Error::CorruptObject {
                oid: object_id.to_string(),
                reason: error.to_string(),
            }
        })?;

        Self::split_header(object_id, framed)
    }

    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        self.load_raw(object_id).map(|(object_type, _)| object_type)
    }

    fn split_header(object_id: &ObjectId, framed: Bytes) -> Result<(ObjectType, Bytes)> {
        let corrupt = |reason: &str| Error::CorruptObject {
            oid: object_id.to_string(),
            reason: reason.to_string(),
        };

        let nul = framed
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| corrupt("missing header terminator"))?;
        let header = std::str::from_utf8(&framed[..nul]).map_err(|_| corrupt("header is not ASCII"))?;
        let (kind, size) = header
            .split_once(' ')
            .ok_or_else(|| corrupt("header has no size"))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| corrupt("header size is not a number"))?;

        let payload = framed.slice(nul + 1..);
        if payload.len() != size {
            return Err(corrupt(&format!(
                "declared {size} bytes but found {}",
                payload.len()
            )));
        }

        Ok((ObjectType::try_from(kind)?, payload))
    }

    fn write_object(&self, object_path: &Path, framed: Bytes) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::CorruptObject {
                oid: object_path.display().to_string(),
                reason: "invalid object path".into(),
            })?;
        std::fs::create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let compressed = Self::compress(framed)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)?;
        file.write_all(&compressed)?;
        drop(file);

        // the rename is atomic, so readers never see a partial object
        if let Err(error) = std::fs::rename(&temp_object_path, object_path) {
            let _ = std::fs::remove_file(&temp_object_path);
            return Err(error.into());
        }

        Ok(())
    }

    fn compress(data: Bytes) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: Bytes) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Every stored object whose digest starts with `prefix`.
    ///
    /// `prefix` must be lowercase hex of at least two characters, so only one
    /// fan-out directory is scanned.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let (Some(dir_name), Some(file_prefix)) = (prefix.get(..2), prefix.get(2..)) else {
            return Ok(Vec::new());
        };
        let dir_path: PathBuf = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix) {
                // temp files and other strays fail to parse
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }
}
