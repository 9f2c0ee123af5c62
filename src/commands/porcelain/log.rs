use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Branch to list; the current branch when None
    pub branch: Option<String>,
    pub oneline: bool,
}

impl Repository {
    /// Lazy tip-to-root history of a branch (the current one when None)
    pub fn history(&self, branch: Option<&BranchName>) -> anyhow::Result<RevList<'_>> {
        self.ensure_initialized()?;

        let branch = match branch {
            Some(branch) => {
                if !self.refs().branch_exists(branch) {
                    return Err(VcsError::BranchNotFound(branch.to_string()).into());
                }
                branch.clone()
            }
            None => self.refs().current_branch()?,
        };

        Ok(self.rev_list(self.refs().tip_of(&branch)?))
    }

    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        let branch = opts
            .branch
            .as_ref()
            .map(|name| {
                BranchName::try_parse(name.clone())
                    .map_err(|_| VcsError::BranchNotFound(name.clone()))
            })
            .transpose()?;

        let mut history = self.history(branch.as_ref())?.peekable();
        if history.peek().is_none() {
            writeln!(self.writer(), "No commits yet")?;
            return Ok(());
        }

        let mut first = true;
        for entry in history {
            let (commit_oid, commit) = entry?;

            if opts.oneline {
                self.show_commit_oneline(&commit_oid, &commit)?;
            } else {
                if !first {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(&commit_oid, &commit)?;
            }
            first = false;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).yellow()
        )?;
        writeln!(self.writer(), "Date:   {}", commit.iso_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit_oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
