//! SHA-1 trailer of the index file
//!
//! Wraps a reader or writer and feeds every byte that passes through it into a
//! running digest.

use crate::artifacts::index::CHECKSUM_SIZE;
use crate::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

#[derive(Debug)]
pub struct Checksum<T> {
    inner: T,
    digest: Sha1,
}

impl<T> Checksum<T> {
    pub fn new(inner: T) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Checksum<T> {
    pub fn read(&mut self, size: usize) -> Result<Bytes> {
        let mut buffer = vec![0; size];
        self.inner
            .read_exact(&mut buffer)
            .map_err(|_| Error::MalformedObject("unexpected end of index file".into()))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    /// Compare the trailer against the digest of everything read so far. A
    /// file that ends right after the last entry carries no trailer and is
    /// accepted as is.
    pub fn verify(&mut self) -> Result<()> {
        let mut trailer = Vec::with_capacity(CHECKSUM_SIZE);
        self.inner.read_to_end(&mut trailer)?;

        if trailer.is_empty() {
            return Ok(());
        }

        let actual = self.digest.clone().finalize();
        if trailer.len() < CHECKSUM_SIZE || trailer[..CHECKSUM_SIZE] != actual[..] {
            return Err(Error::MalformedObject(
                "index checksum does not match its content".into(),
            ));
        }

        Ok(())
    }
}

impl<T: Write> Checksum<T> {
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> Result<()> {
        let checksum = self.digest.clone().finalize();
        self.inner.write_all(checksum.as_slice())?;
        Ok(())
    }
}
