//! Content-addressed objects
//!
//! The only persisted object kind is the commit record: a full snapshot of the staged
//! files together with a message, a timestamp and an optional parent link. Its identity is
//! the SHA-1 of its canonical serialization.
//!
//! - `content_hasher`: streaming SHA-1 over files and byte buffers
//! - `object_id`: the 40-hex content hash
//! - `object`: serialization traits shared by persisted records
//! - `commit`: the commit record and its codec

pub mod commit;
pub mod content_hasher;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
