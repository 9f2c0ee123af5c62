use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::VcsError;
use std::io::Write;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Switched,
    AlreadyOn,
}

impl Repository {
    /// Point HEAD at another branch
    ///
    /// Only HEAD moves: the working tree and the index are never rewritten, which is why
    /// the switch is refused while the working tree diverges from the current branch.
    pub fn checkout(&self, target: &str) -> anyhow::Result<CheckoutOutcome> {
        self.ensure_initialized()?;

        let target = BranchName::try_parse(target.to_string())
            .map_err(|_| VcsError::BranchNotFound(target.to_string()))?;
        if !self.refs().branch_exists(&target) {
            return Err(VcsError::BranchNotFound(target.to_string()).into());
        }

        if self.refs().is_current_branch(&target)? {
            writeln!(self.writer(), "Already on '{}'", target)?;
            return Ok(CheckoutOutcome::AlreadyOn);
        }

        if let Some(divergence) = self.inspector().first_divergence()? {
            warn!(
                target = %target,
                path = %divergence.path.display(),
                "refusing to switch branches"
            );
            return Err(VcsError::UncommittedChanges(divergence.summary()).into());
        }

        self.refs().set_head(&target)?;

        info!(branch = %target, "switched branch");
        writeln!(self.writer(), "Switched to branch '{}'", target)?;

        Ok(CheckoutOutcome::Switched)
    }
}
