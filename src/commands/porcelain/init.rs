use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    /// Create the control directory layout with an empty `master` branch
    ///
    /// Running it again on an initialized working tree only prints a notice.
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Repository already initialized in {}",
                self.control_path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .myvcs/commits directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .myvcs/refs directory")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .create_branch(&default_branch, None)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create the initial HEAD")?;

        let mut index = self.index();
        index
            .write_updates()
            .context("Failed to create .myvcs/index file")?;

        info!(path = %self.path().display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.control_path().display()
        )?;

        Ok(())
    }
}
