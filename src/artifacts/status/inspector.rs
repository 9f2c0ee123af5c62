//! Divergence detection between the working tree, the index and the tip commit
//!
//! Checks run in a fixed priority order: files recorded in the tip commit first, then
//! staged files, then untracked files found by walking the working tree. Deletions and
//! modifications of tracked content are therefore always reported before untracked noise.

use crate::areas::repository::Repository;
use crate::artifacts::objects::content_hasher::hash_bytes;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{ChangeSource, ChangeType, Divergence};
use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Inspector<'r, F> {
    repository: &'r Repository,
    /// Paths (relative to the working-tree root) the untracked-file walk must not enter
    skip: F,
}

impl<'r, F> Inspector<'r, F>
where
    F: Fn(&Path) -> bool,
{
    pub fn new(repository: &'r Repository, skip: F) -> Self {
        Inspector { repository, skip }
    }

    /// True when the working tree diverges from the tip commit or the index
    ///
    /// Stops at the first divergence, which is logged.
    pub fn has_uncommitted_changes(&self) -> anyhow::Result<bool> {
        match self.first_divergence()? {
            Some(divergence) => {
                info!(path = %divergence.path.display(), change = ?divergence.change, source = ?divergence.source, "working tree diverges");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn first_divergence(&self) -> anyhow::Result<Option<Divergence>> {
        let mut found = None;
        self.scan(|divergence| {
            found = Some(divergence);
            ControlFlow::Break(())
        })?;

        Ok(found)
    }

    /// Every divergence, in priority order, at most one per path
    pub fn divergences(&self) -> anyhow::Result<Vec<Divergence>> {
        let mut seen = BTreeSet::new();
        let mut found = Vec::new();
        self.scan(|divergence| {
            if seen.insert(divergence.path.clone()) {
                found.push(divergence);
            }
            ControlFlow::Continue(())
        })?;

        Ok(found)
    }

    fn scan(&self, mut visit: impl FnMut(Divergence) -> ControlFlow<()>) -> anyhow::Result<()> {
        self.repository.ensure_initialized()?;

        let mut tracked = BTreeSet::<PathBuf>::new();

        if let Some(tip_oid) = self.repository.refs().read_head()? {
            let tip = self.repository.database().parse_commit(&tip_oid)?;
            debug!(tip = %tip_oid, files = tip.files().len(), "checking tip commit");

            for (path, data) in tip.files() {
                tracked.insert(path.clone());
                let divergence = self.check_against_workspace(
                    path,
                    &hash_bytes(data),
                    ChangeSource::LastCommit,
                )?;

                if let Some(divergence) = divergence
                    && visit(divergence).is_break()
                {
                    return Ok(());
                }
            }
        }

        let index = self.repository.load_index()?;
        for entry in index.entries() {
            let divergence =
                self.check_against_workspace(&entry.name, &entry.oid, ChangeSource::Index)?;
            tracked.insert(entry.name);

            if let Some(divergence) = divergence
                && visit(divergence).is_break()
            {
                return Ok(());
            }
        }

        for file in self.repository.workspace().list_files(None, &self.skip)? {
            if !tracked.contains(&file) {
                let divergence =
                    Divergence::new(file, ChangeType::Untracked, ChangeSource::Workspace);
                if visit(divergence).is_break() {
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn check_against_workspace(
        &self,
        path: &Path,
        expected: &ObjectId,
        source: ChangeSource,
    ) -> anyhow::Result<Option<Divergence>> {
        let workspace = self.repository.workspace();

        if !workspace.is_file(path) {
            return Ok(Some(Divergence::new(
                path.to_path_buf(),
                ChangeType::Deleted,
                source,
            )));
        }

        if &workspace.hash_file(path)? != expected {
            return Ok(Some(Divergence::new(
                path.to_path_buf(),
                ChangeType::Modified,
                source,
            )));
        }

        Ok(None)
    }
}
