//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path, relative to the worktree and `/`-separated
//! - Content hash (object ID)
//! - File metadata (mode, size, timestamps, ownership)
//!
//! ## Entry Format
//!
//! ```text
//! ctime  ctime_nsec  mtime  mtime_nsec  dev  ino  mode  uid  gid  size   (10 x u32)
//! oid                                                                    (20 bytes)
//! flags: assume-valid (1 bit) | extended (1 bit) | stage (2 bits) | name length (12 bits)
//! name, NUL, zero padding up to the next multiple of 8
//! ```

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::{ENTRY_BLOCK, ENTRY_FIXED_SIZE, MAX_NAME_LENGTH};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::{Error, Result};
use bitflags::bitflags;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::io::Write;
use std::os::unix::prelude::MetadataExt;
use std::path::Path;

/// Smallest possible record: fixed part, one-byte name and its NUL
pub const ENTRY_MIN_SIZE: usize = 64;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EntryFlags: u16 {
        const ASSUME_VALID = 0x8000;
        const EXTENDED = 0x4000;
        const STAGE = 0x3000;
        const NAME_LENGTH = 0x0FFF;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to the worktree root
    pub name: String,
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

/// Stat data recorded alongside each entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: i64,
    pub ctime_nsec: i64,
    pub mtime: i64,
    pub mtime_nsec: i64,
    pub dev: u64,
    pub ino: u64,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub assume_valid: bool,
    /// Merge stage, always 0 for entries written here
    pub stage: u8,
}

impl EntryMetadata {
    /// Stat data of a regular file. Executable files keep their `x` bits only
    /// when the repository tracks file modes.
    pub fn from_fs(path: &Path, metadata: &Metadata, track_file_mode: bool) -> Self {
        EntryMetadata {
            ctime: metadata.ctime(),
            ctime_nsec: metadata.ctime_nsec(),
            mtime: metadata.mtime(),
            mtime_nsec: metadata.mtime_nsec(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode: EntryMode::regular(track_file_mode && path.is_executable()),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
            assume_valid: false,
            stage: 0,
        }
    }
}

impl IndexEntry {
    /// Directory holding the entry, `""` for the worktree root.
    pub fn parent_dir(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }

    pub fn basename(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map(|(_, basename)| basename)
            .unwrap_or(&self.name)
    }

    pub fn flags(&self) -> EntryFlags {
        let name_length = self.name.len().min(MAX_NAME_LENGTH) as u16;
        let stage = (u16::from(self.metadata.stage) << 12) & EntryFlags::STAGE.bits();

        let mut flags = EntryFlags::from_bits_retain(name_length | stage);
        flags.set(EntryFlags::ASSUME_VALID, self.metadata.assume_valid);
        flags
    }

    /// Size of the padded on-disk record.
    pub fn disk_size(&self) -> usize {
        Self::record_size(self.name.len())
    }

    fn record_size(name_length: usize) -> usize {
        (ENTRY_FIXED_SIZE + name_length + ENTRY_BLOCK) / ENTRY_BLOCK * ENTRY_BLOCK
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        let mut entry_bytes = Vec::with_capacity(self.disk_size());
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size as u32)?;
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(self.flags().bits())?;
        entry_bytes.write_all(self.name.as_bytes())?;

        // at least one NUL, then pad to the block size
        entry_bytes.resize(self.disk_size(), 0);

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(bytes: Bytes) -> Result<Self> {
        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(Error::MalformedObject("truncated index entry".into()));
        }

        let read_u32 = |offset: usize| byteorder::NetworkEndian::read_u32(&bytes[offset..offset + 4]);
        let mode = EntryMode::try_from(read_u32(24))?;
        let oid = ObjectId::read_h40_from(&mut &bytes[40..60])?;
        let flags = EntryFlags::from_bits_retain(byteorder::NetworkEndian::read_u16(&bytes[60..62]));

        // names too long for the 12-bit field run up to the first NUL after it
        let name_length = (flags & EntryFlags::NAME_LENGTH).bits() as usize;
        let name_end = if name_length < MAX_NAME_LENGTH {
            ENTRY_FIXED_SIZE + name_length
        } else {
            bytes
                .get(ENTRY_FIXED_SIZE + MAX_NAME_LENGTH..)
                .and_then(|rest| rest.iter().position(|&b| b == 0))
                .map(|offset| ENTRY_FIXED_SIZE + MAX_NAME_LENGTH + offset)
                .ok_or_else(|| Error::MalformedObject("unterminated index entry name".into()))?
        };
        if bytes.get(name_end) != Some(&0) {
            return Err(Error::MalformedObject(
                "index entry name is not NUL-terminated".into(),
            ));
        }

        let name = std::str::from_utf8(&bytes[ENTRY_FIXED_SIZE..name_end])
            .map_err(|_| Error::MalformedObject("index entry name is not UTF-8".into()))?
            .to_string();

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime: i64::from(read_u32(0)),
                ctime_nsec: i64::from(read_u32(4)),
                mtime: i64::from(read_u32(8)),
                mtime_nsec: i64::from(read_u32(12)),
                dev: u64::from(read_u32(16)),
                ino: u64::from(read_u32(20)),
                mode,
                uid: read_u32(28),
                gid: read_u32(32),
                size: u64::from(read_u32(36)),
                assume_valid: flags.contains(EntryFlags::ASSUME_VALID),
                stage: ((flags & EntryFlags::STAGE).bits() >> 12) as u8,
            },
        })
    }
}
