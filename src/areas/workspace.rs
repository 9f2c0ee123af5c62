//! Working tree access
//!
//! All paths handed out by the workspace are relative to the working-tree root. Reads
//! always go to disk; nothing is cached between calls.

use crate::artifacts::objects::content_hasher;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Resolve a user-supplied path (absolute or relative to the process's current
    /// directory) to a path relative to the working-tree root
    pub fn resolve(&self, user_path: &Path) -> anyhow::Result<PathBuf> {
        let absolute_path = if user_path.is_absolute() {
            user_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(user_path)
        };

        if !absolute_path.exists() {
            return Err(VcsError::FileNotFound(user_path.to_path_buf()).into());
        }

        let absolute_path = absolute_path
            .canonicalize()
            .with_context(|| format!("Unable to resolve path {}", user_path.display()))?;

        absolute_path
            .strip_prefix(self.path.as_ref())
            .map(PathBuf::from)
            .with_context(|| {
                format!(
                    "{} is outside the repository at {}",
                    user_path.display(),
                    self.path.display()
                )
            })
    }

    /// List the files under `root_file_path` (the whole tree when None), sorted by name
    ///
    /// Entries for which `skip` returns true are pruned; when a directory is skipped, its
    /// contents are never visited.
    pub fn list_files(
        &self,
        root_file_path: Option<&Path>,
        skip: impl Fn(&Path) -> bool,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.clone().into(),
        };

        // Check if the root_file_path exists
        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        if !root_file_path.is_dir() {
            return Ok(vec![
                root_file_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root_file_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| match entry.path().strip_prefix(self.path.as_ref()) {
                Ok(relative) if relative.as_os_str().is_empty() => true,
                Ok(relative) => !skip(relative),
                Err(_) => false,
            });

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Unable to walk directory {}", root_file_path.display())
            })?;

            if entry.file_type().is_file() {
                let relative = entry.path().strip_prefix(self.path.as_ref())?;
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Content hash of a working-tree file, streamed from disk
    pub fn hash_file(&self, file_path: &Path) -> anyhow::Result<ObjectId> {
        content_hasher::hash_file(&self.path.join(file_path))
    }
}
