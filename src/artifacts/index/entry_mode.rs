//! Mode word of an index entry
//!
//! Stored as a 32-bit integer: 4 bits of object type followed by 3 unused bits
//! and 9 permission bits.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeType {
    #[default]
    Regular,
    Symlink,
    Gitlink,
}

impl ModeType {
    pub fn as_bits(&self) -> u32 {
        match self {
            ModeType::Regular => 0b1000,
            ModeType::Symlink => 0b1010,
            ModeType::Gitlink => 0b1110,
        }
    }
}

impl TryFrom<u32> for ModeType {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            0b1000 => Ok(ModeType::Regular),
            0b1010 => Ok(ModeType::Symlink),
            0b1110 => Ok(ModeType::Gitlink),
            _ => Err(Error::MalformedObject(format!(
                "unknown index entry type {bits:#06b}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMode {
    pub kind: ModeType,
    pub perms: u32,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::regular(false)
    }
}

impl EntryMode {
    pub fn regular(executable: bool) -> Self {
        EntryMode {
            kind: ModeType::Regular,
            perms: if executable { 0o755 } else { 0o644 },
        }
    }

    pub fn as_u32(&self) -> u32 {
        (self.kind.as_bits() << 12) | (self.perms & 0o777)
    }

    /// Six-digit octal mode as written in tree objects, e.g. `100644`.
    pub fn tree_mode(&self) -> String {
        format!("{:02o}{:04o}", self.kind.as_bits(), self.perms)
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = Error;

    fn try_from(mode: u32) -> Result<Self> {
        Ok(EntryMode {
            kind: ModeType::try_from(mode >> 12)?,
            perms: mode & 0o777,
        })
    }
}
