//! Commit record
//!
//! A commit is an immutable, full snapshot of every staged path at commit time, plus a
//! message, a timestamp and an optional parent link. There are no tree objects: file
//! bytes are embedded in the record itself.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! parent <parent-sha>                 (absent for a root commit)
//! timestamp <rfc3339>
//! file <byte-length> <path-length>
//! <path><raw bytes>
//! ...
//!
//! <commit message>
//! ```
//!
//! Paths are length-prefixed like the file bytes, so any UTF-8 file name (newlines
//! included) survives a round trip.
//!
//! Files are kept in a `BTreeMap`, so two commits with the same content serialize (and
//! therefore hash) identically regardless of the order paths were staged in.

use crate::artifacts::core::{path_to_slash, slash_to_path};
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Header tag written in front of every serialized commit
pub const COMMIT_TAG: &str = "commit";

/// Environment variable overriding the commit timestamp (RFC 3339)
pub const COMMIT_DATE_ENV: &str = "MYVCS_COMMIT_DATE";

/// Commit record
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tip of the branch when this commit was created (None for a root commit)
    parent: Option<ObjectId>,
    /// Creation time
    timestamp: DateTime<FixedOffset>,
    /// Path to raw content snapshot
    files: BTreeMap<PathBuf, Bytes>,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        files: BTreeMap<PathBuf, Bytes>,
        message: String,
    ) -> Self {
        Commit {
            parent,
            timestamp,
            files,
            message,
        }
    }

    /// Timestamp for a new commit
    ///
    /// Reads `MYVCS_COMMIT_DATE` if present, otherwise uses the current local time.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_rfc3339(date_str.trim())
                .with_context(|| format!("{COMMIT_DATE_ENV} is not an RFC 3339 date: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    /// ISO-8601 rendering used both on disk and in `log`
    pub fn iso_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.files
    }

    pub fn file(&self, path: &Path) -> Option<&Bytes> {
        self.files.get(path)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        if let Some(parent) = &self.parent {
            writeln!(content_bytes, "parent {}", parent.as_ref())?;
        }
        writeln!(content_bytes, "timestamp {}", self.iso_timestamp())?;
        for (path, data) in &self.files {
            let path = encode_path(path)?;
            writeln!(content_bytes, "file {} {}", data.len(), path.len())?;
            content_bytes.write_all(path.as_bytes())?;
            content_bytes.write_all(data)?;
            content_bytes.write_all(b"\n")?;
        }
        content_bytes.write_all(b"\n")?;
        content_bytes.write_all(self.message.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", COMMIT_TAG, content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

/// Slash-separated form of a tracked path; non-UTF-8 names cannot be recorded
fn encode_path(path: &Path) -> anyhow::Result<String> {
    if path.to_str().is_none() {
        return Err(VcsError::UnsupportedPath(path.to_path_buf()).into());
    }

    Ok(path_to_slash(path))
}

fn remaining(reader: &Cursor<Vec<u8>>) -> usize {
    (reader.get_ref().len() as u64).saturating_sub(reader.position()) as usize
}

fn read_header_line(reader: &mut impl BufRead) -> anyhow::Result<String> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;

    if line.pop() != Some(b'\n') {
        anyhow::bail!("Invalid commit object: unexpected end of header");
    }

    String::from_utf8(line).context("Invalid commit object: header is not UTF-8")
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tag = Vec::new();
        reader.read_until(b'\0', &mut tag)?;
        if tag.pop() != Some(b'\0') {
            anyhow::bail!("Invalid commit object: missing header terminator");
        }
        let tag = String::from_utf8(tag).context("Invalid commit object: bad header")?;
        let size = tag
            .strip_prefix(COMMIT_TAG)
            .and_then(|rest| rest.strip_prefix(' '))
            .context("Invalid commit object: not a commit")?
            .parse::<usize>()
            .context("Invalid commit object: invalid size")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        if content.len() != size {
            anyhow::bail!(
                "Invalid commit object: expected {} bytes, found {}",
                size,
                content.len()
            );
        }
        let mut reader = Cursor::new(content);

        let mut parent = None;
        let mut timestamp = None;
        let mut files = BTreeMap::new();

        loop {
            let line = read_header_line(&mut reader)?;
            if line.is_empty() {
                break;
            }

            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(date) = line.strip_prefix("timestamp ") {
                timestamp = Some(
                    DateTime::parse_from_rfc3339(date)
                        .context("Invalid commit object: invalid timestamp")?,
                );
            } else if let Some(file_line) = line.strip_prefix("file ") {
                let (length, path_length) = file_line
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                let length = length
                    .parse::<usize>()
                    .context("Invalid commit object: invalid file length")?;
                let path_length = path_length
                    .parse::<usize>()
                    .context("Invalid commit object: invalid path length")?;

                let needed = length
                    .checked_add(path_length)
                    .and_then(|n| n.checked_add(1))
                    .context("Invalid commit object: file entry too large")?;
                if needed > remaining(&reader) {
                    anyhow::bail!("Invalid commit object: truncated file content");
                }

                let mut path = vec![0; path_length];
                reader.read_exact(&mut path)?;
                let path =
                    String::from_utf8(path).context("Invalid commit object: path is not UTF-8")?;
                if path.is_empty() {
                    anyhow::bail!("Invalid commit object: empty file path");
                }

                let mut data = vec![0; length];
                reader
                    .read_exact(&mut data)
                    .context("Invalid commit object: truncated file content")?;
                let mut terminator = [0u8; 1];
                reader
                    .read_exact(&mut terminator)
                    .context("Invalid commit object: truncated file content")?;
                if terminator[0] != b'\n' {
                    anyhow::bail!("Invalid commit object: file content is not terminated");
                }

                files.insert(slash_to_path(&path), Bytes::from(data));
            } else {
                anyhow::bail!("Invalid commit object: unexpected line '{}'", line);
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;

        let mut message = String::new();
        reader
            .read_to_string(&mut message)
            .context("Invalid commit object: message is not UTF-8")?;

        Ok(Self::new(parent, timestamp, files, message))
    }
}

impl Object for Commit {}
