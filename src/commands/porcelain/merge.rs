use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::VcsError;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    AlreadyUpToDate,
    Completed,
}

impl Repository {
    /// Compare the tip of `target` with the current tip
    ///
    /// This is an equality check only. No ref, index entry or working-tree file is touched
    /// in either outcome; combining content is not supported.
    pub fn merge(&self, target: &str) -> anyhow::Result<MergeOutcome> {
        self.ensure_initialized()?;

        let target = BranchName::try_parse(target.to_string())
            .map_err(|_| VcsError::BranchNotFound(target.to_string()))?;
        if !self.refs().branch_exists(&target) {
            return Err(VcsError::BranchNotFound(target.to_string()).into());
        }

        let current_branch = self.refs().current_branch()?;
        let head_oid = self.refs().tip_of(&current_branch)?;
        let merge_oid = self.refs().tip_of(&target)?;

        if head_oid == merge_oid {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        info!(target = %target, into = %current_branch, "merge reported without changes");
        writeln!(
            self.writer(),
            "Merged branch '{}' into '{}' (no files were changed)",
            target,
            current_branch
        )?;

        Ok(MergeOutcome::Completed)
    }
}
