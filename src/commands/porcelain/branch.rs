use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use colored::Colorize;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Create a branch pointing at the current branch's tip
    ///
    /// HEAD is left where it is; the new branch only shares history with the current one.
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let source_oid = self.refs().read_head()?.ok_or(VcsError::NoCommitsYet)?;

        self.refs().create_branch(&branch_name, Some(&source_oid))?;

        info!(branch = %branch_name, oid = %source_oid, "created branch");
        writeln!(
            self.writer(),
            "Created branch {} at {}",
            branch_name,
            source_oid.to_short_oid()
        )?;

        Ok(source_oid)
    }

    /// Print every branch, marking the current one with `*`
    pub fn list_branches(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let current_branch = self.refs().current_branch()?;
        for branch_name in self.refs().list_branches()? {
            if branch_name == current_branch {
                writeln!(self.writer(), "* {}", branch_name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch_name)?;
            }
        }

        Ok(())
    }
}
