//! Key-value list with message
//!
//! The text layout shared by commit and tag objects:
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author Jane Doe <jane@example.com> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  continuation lines start with a single space
//!
//! Free-text message
//! ```
//!
//! Keys keep their first-insertion order. A key that appears several times (e.g.
//! `parent` on merge commits) collects all of its values in order.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::{Error, Result};
use bytes::Bytes;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kvlm {
    headers: Vec<(String, Vec<Bytes>)>,
    message: Option<Bytes>,
}

impl Kvlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Bytes> {
        self.get_all(key).first()
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> &[Bytes] {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// First value under `key`, decoded as UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|value| std::str::from_utf8(value).ok())
    }

    /// Replace whatever is stored under `key` with a single value.
    pub fn set(&mut self, key: &str, value: impl Into<Bytes>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => *values = vec![value],
            None => self.headers.push((key.to_string(), vec![value])),
        }
    }

    /// Append a value under `key`, keeping earlier ones.
    pub fn push(&mut self, key: &str, value: impl Into<Bytes>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((key.to_string(), vec![value])),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(key, _)| key.as_str())
    }

    pub fn message(&self) -> Option<&Bytes> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, message: impl Into<Bytes>) {
        self.message = Some(message.into());
    }
}

fn find(raw: &[u8], needle: u8, from: usize) -> Option<usize> {
    raw.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

/// `\n ` → `\n`
fn unfold(value: &[u8]) -> Vec<u8> {
    let mut unfolded = Vec::with_capacity(value.len());
    let mut bytes = value.iter().peekable();

    while let Some(&byte) = bytes.next() {
        unfolded.push(byte);
        if byte == b'\n' && bytes.peek() == Some(&&b' ') {
            bytes.next();
        }
    }

    unfolded
}

/// `\n` → `\n `
fn fold(value: &[u8]) -> Vec<u8> {
    let mut folded = Vec::with_capacity(value.len());

    for &byte in value {
        folded.push(byte);
        if byte == b'\n' {
            folded.push(b' ');
        }
    }

    folded
}

impl Unpackable for Kvlm {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let raw = payload.as_ref();
        let mut kvlm = Kvlm::new();
        let mut start = 0;

        loop {
            let space = find(raw, b' ', start);
            let newline = find(raw, b'\n', start);

            // A newline before any space means a blank line: the message follows
            let header_ends = match (space, newline) {
                (None, _) => true,
                (Some(space), Some(newline)) => newline < space,
                (Some(_), None) => false,
            };
            if header_ends {
                if newline != Some(start) {
                    return Err(Error::MalformedObject(
                        "missing blank line before message".into(),
                    ));
                }
                kvlm.message = Some(payload.slice(start + 1..));
                return Ok(kvlm);
            }

            // `header_ends` is false only when a space was found
            let space = space.unwrap_or_default();
            let key = std::str::from_utf8(&raw[start..space])
                .map_err(|_| Error::MalformedObject("header key is not UTF-8".into()))?
                .to_string();

            // The value ends at the first newline not followed by a continuation space
            let mut end = space;
            loop {
                end = find(raw, b'\n', end + 1).ok_or_else(|| {
                    Error::MalformedObject(format!("unterminated value for header {key:?}"))
                })?;
                if raw.get(end + 1) != Some(&b' ') {
                    break;
                }
            }

            let value = Bytes::from(unfold(&raw[space + 1..end]));
            kvlm.push(&key, value);

            start = end + 1;
        }
    }
}

impl Packable for Kvlm {
    fn serialize(&self) -> Result<Bytes> {
        let message = self
            .message
            .as_ref()
            .ok_or_else(|| Error::MalformedObject("message is missing".into()))?;

        let mut raw = Vec::new();
        for (key, values) in &self.headers {
            for value in values {
                raw.extend_from_slice(key.as_bytes());
                raw.push(b' ');
                raw.extend_from_slice(&fold(value));
                raw.push(b'\n');
            }
        }
        raw.push(b'\n');
        raw.extend_from_slice(message);

        Ok(Bytes::from(raw))
    }
}
