//! Branch references and HEAD
//!
//! Branches are human-readable names pointing at the tip commit of a line of history.
//!
//! ## File Format
//!
//! - `.myvcs/refs/<branch>`: the tip's 40-character hash, or an empty file when the
//!   branch has no commits yet
//! - `.myvcs/HEAD`: the name of the current branch, as plain text
//!
//! Ref files are always rewritten in full under an exclusive lock; there is no partial
//! update.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Name of the HEAD file inside the control directory
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the directory holding one file per branch
pub const REFS_DIR_NAME: &str = "refs";

/// References manager
///
/// Handles reading and writing branch tips and HEAD.
#[derive(Debug)]
pub struct Refs {
    /// Path to the control directory (typically `.myvcs`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Read the branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        if !head_path.is_file() {
            return Err(VcsError::NotInitialized.into());
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
            .map_err(|err| VcsError::corrupt(HEAD_REF_NAME, format!("{err:#}")).into())
    }

    /// Check if a branch is the currently checked-out branch
    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.refs_path().join(branch_name.as_ref()).is_file()
    }

    /// Read the tip commit of a branch
    ///
    /// # Returns
    ///
    /// None when the branch has no commits yet (empty or missing ref file)
    pub fn tip_of(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.refs_path().join(branch_name.as_ref());
        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|err| {
                VcsError::corrupt(format!("refs/{branch_name}"), format!("{err:#}")).into()
            })
    }

    /// Tip of the branch HEAD points at
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.tip_of(&self.current_branch()?)
    }

    pub fn set_tip(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        let ref_path = self.refs_path().join(branch_name.as_ref()).into_boxed_path();
        self.update_ref_file(ref_path, oid.as_ref().to_string())?;

        debug!(branch = %branch_name, oid = %oid, "advanced branch tip");
        Ok(())
    }

    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), branch_name.to_string())?;

        debug!(branch = %branch_name, "updated HEAD");
        Ok(())
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        // open the ref file as WRONLY and CREAT to write the new content to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Create a new branch pointing at `source_oid` (or with no tip at all)
    pub fn create_branch(
        &self,
        name: &BranchName,
        source_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        let branch_path = self.refs_path().join(name.as_ref()).into_boxed_path();

        // check whether another branch with the same name already exists
        if branch_path.exists() {
            return Err(VcsError::AlreadyExists(name.to_string()).into());
        }

        let raw_ref = source_oid
            .map(|oid| oid.as_ref().to_string())
            .unwrap_or_default();
        self.update_ref_file(branch_path, raw_ref)?;

        debug!(branch = %name, "created branch");
        Ok(())
    }

    /// List every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let refs_path = self.refs_path();

        WalkDir::new(&refs_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(refs_path.as_ref()).ok()?;
                Some(crate::artifacts::core::path_to_slash(relative_path))
            })
            .map(BranchName::try_parse)
            .collect()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join(REFS_DIR_NAME).into_boxed_path()
    }
}
