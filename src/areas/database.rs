//! Object database
//!
//! Pure key to blob storage for commit records. Every object lives in its own file,
//! named by its content hash, zlib-compressed on disk. Nothing is cached: every read hits
//! the filesystem, so results are a point-in-time snapshot.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

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

    fn object_path(&self, key: &ObjectId) -> PathBuf {
        self.path.join(key.as_ref())
    }

    pub fn exists(&self, key: &ObjectId) -> bool {
        self.object_path(key).is_file()
    }

    /// Write `content` under `key`, replacing any previous value
    pub fn put(&self, key: &ObjectId, content: Bytes) -> anyhow::Result<()> {
        let object_path = self.object_path(key);
        self.write_object(object_path, content)?;

        debug!(oid = %key, "stored object");
        Ok(())
    }

    /// Read the raw (decompressed) content stored under `key`
    pub fn get(&self, key: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(key);
        if !object_path.is_file() {
            return Err(VcsError::ObjectNotFound(key.clone()).into());
        }

        self.read_object(object_path)
    }

    /// Serialize and persist an object, returning its content hash
    ///
    /// Objects are content addressed, so writing one that already exists is skipped.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;

        if !self.exists(&object_id) {
            self.put(&object_id, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.get(object_id)?;

        Commit::deserialize(Cursor::new(content))
            .map_err(|err| VcsError::corrupt(object_id, format!("{err:#}")).into())
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        // decompress the object content
        Self::decompress(object_content.into()).map_err(|err| {
            let name = object_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            VcsError::corrupt(name, format!("{err:#}")).into()
        })
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        // compress the object content
        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
