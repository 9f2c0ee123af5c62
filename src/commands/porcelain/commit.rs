use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Record the staged paths as a new commit on the current branch
    ///
    /// File contents are read from the working tree at this point, not at staging time.
    /// Nothing is written unless every staged file could be read.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let mut index = self.load_index()?;
        if index.is_empty() {
            return Err(VcsError::NothingToCommit.into());
        }

        let mut files = BTreeMap::new();
        for path in index.paths() {
            if !self.workspace().is_file(path) {
                return Err(VcsError::FileNotFound(path.clone()).into());
            }
            files.insert(path.clone(), self.workspace().read_file(path)?);
        }

        let branch = self.refs().current_branch()?;
        let parent = self.refs().tip_of(&branch)?;
        let is_root = match parent {
            Some(_) => "",
            None => " (root-commit)",
        };

        let timestamp = Commit::timestamp_from_env()?;
        let commit = Commit::new(parent, timestamp, files, message.to_string());
        let commit_id = commit.object_id()?;

        self.database().store(&commit)?;
        self.refs().set_tip(&branch, &commit_id)?;

        index.clear();
        index.write_updates()?;

        info!(branch = %branch, oid = %commit_id, files = commit.files().len(), "created commit");
        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
