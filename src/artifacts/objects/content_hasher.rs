//! Streaming SHA-1 over byte content
//!
//! Input is consumed in fixed-size chunks so memory use stays bounded regardless of the
//! size of the file being hashed.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::Path;

/// Chunk size used when streaming content into the digest
pub const CHUNK_SIZE: usize = 4096;

pub fn hash_reader(mut reader: impl Read) -> anyhow::Result<ObjectId> {
    let mut hasher = Sha1::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }

    Ok(ObjectId::from_digest(&hasher.finalize()))
}

pub fn hash_bytes(data: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    for chunk in data.chunks(CHUNK_SIZE) {
        hasher.update(chunk);
    }

    ObjectId::from_digest(&hasher.finalize())
}

pub fn hash_file(path: &Path) -> anyhow::Result<ObjectId> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Unable to open file {}", path.display()))?;

    hash_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Unable to hash file {}", path.display()))
}
