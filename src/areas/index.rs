//! Staging index
//!
//! The index is the set of paths staged for the next commit, each mapped to the content
//! hash it had when staged. It is loaded fresh from disk at the start of every operation
//! and rewritten in full when saved.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Sorted list of staged paths with their content hashes
//! - Checksum: SHA-1 hash of the entire index for integrity verification

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_FIXED_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::{Context, anyhow};
use byteorder::ByteOrder;
use std::collections::BTreeMap;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Staging index
///
/// Maps working-tree paths to staged content hashes. Paths are unique and kept sorted so
/// the on-disk form is stable.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.myvcs/index`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<PathBuf, ObjectId>,
    /// Index file header metadata
    header: IndexHeader,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    /// Create a new empty index bound to `path`
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_changes(&self) -> bool {
        self.changed
    }

    /// Drop every staged entry
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
        self.header = IndexHeader::empty();
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file is a fresh repository state and yields an empty
    /// index. A file that fails to parse or whose checksum does not match is reported as
    /// `CorruptObject`.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = false;

        if !self.path().exists() {
            debug!(path = %self.path().display(), "no index file, starting empty");
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("Unable to open index file {}", self.path().display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        // if the index file is empty, return early
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        if let Err(err) = self.parse(&mut reader) {
            self.entries.clear();
            return Err(VcsError::corrupt("index", format!("{err:#}")).into());
        }

        debug!(entries = self.entries.len(), "loaded staging index");
        Ok(())
    }

    fn parse(&mut self, reader: &mut Checksum) -> anyhow::Result<()> {
        let entries_count = self.parse_header(reader)?;
        self.parse_entries(entries_count, reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Parse all entries from the index file
    ///
    /// Each entry is a fixed-size prefix followed by a variable-length path.
    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let fixed = reader.read(ENTRY_FIXED_SIZE)?;
            let path_len = byteorder::NetworkEndian::read_u16(&fixed[ENTRY_FIXED_SIZE - 2..]);
            let path = reader.read(path_len as usize)?;

            let entry_bytes = [fixed.as_ref(), path.as_ref()].concat();
            let entry = IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?;

            self.entries.insert(entry.name, entry.oid);
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    /// Upsert a staged path
    ///
    /// Staging the same content twice leaves the index unchanged.
    pub fn add(&mut self, path: PathBuf, oid: ObjectId) {
        if self.entries.get(&path) != Some(&oid) {
            self.entries.insert(path, oid);
            self.header.entries_count = self.entries.len() as u32;
            self.changed = true;
        }
    }

    /// Persist the index
    ///
    /// The new content is written to a sibling temp file under an exclusive lock and then
    /// renamed over the index, so readers never observe a half-written file.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let index_dir = self
            .path
            .parent()
            .context(format!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("index.tmp-{}", fake::rand::random::<u32>()));

        {
            let mut index_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Unable to open index file {}", temp_path.display()))?;
            let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

            let mut writer = Checksum::new(lock);

            self.header = IndexHeader {
                entries_count: self.entries.len() as u32,
                ..self.header.clone()
            };
            writer.write(&self.header.serialize()?)?;

            for entry in self.entries() {
                writer.write(&entry.serialize()?)?;
            }

            writer.write_checksum()?;
        }

        std::fs::rename(&temp_path, self.path()).with_context(|| {
            format!("Unable to rename index file to {}", self.path().display())
        })?;
        self.changed = false;

        debug!(entries = self.entries.len(), "wrote staging index");
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        self.entries
            .iter()
            .map(|(path, oid)| IndexEntry::new(path.clone(), oid.clone()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }
}
