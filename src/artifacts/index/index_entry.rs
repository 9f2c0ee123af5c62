//! Index entry representation
//!
//! Each entry pairs a repository-relative path with the content hash the file had when it
//! was staged. Only the hash is recorded; the bytes are read again from the working tree at
//! commit time.

use crate::artifacts::core::{path_to_slash, slash_to_path};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_BYTES;
use anyhow::Context;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Maximum path length supported in index entries
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

/// Size of the fixed part of an entry: hash plus path length
pub const ENTRY_FIXED_SIZE: usize = OBJECT_ID_BYTES + 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: PathBuf,
    /// SHA-1 hash of file content at staging time
    pub oid: ObjectId,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = path_to_slash(&self.name);
        if path.len() > MAX_PATH_SIZE {
            anyhow::bail!("Path too long for the index: {}", path);
        }

        let mut bytes = Vec::with_capacity(ENTRY_FIXED_SIZE + path.len());
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        bytes.write_all(path.as_bytes())?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let path_len = reader.read_u16::<byteorder::NetworkEndian>()? as usize;

        let mut path = vec![0; path_len];
        reader
            .read_exact(&mut path)
            .context("Truncated path in index entry")?;
        let path = String::from_utf8(path).context("Index entry path is not UTF-8")?;

        if path.is_empty() {
            anyhow::bail!("Empty path in index entry");
        }

        Ok(IndexEntry::new(slash_to_path(&path), oid))
    }
}
