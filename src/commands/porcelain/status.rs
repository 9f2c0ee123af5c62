use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::Divergence;
use std::io::Write;

impl Repository {
    /// Report every divergence between the working tree, the index and the tip commit
    ///
    /// Read-only: neither the index nor any ref is rewritten.
    pub fn status(&self) -> anyhow::Result<Vec<Divergence>> {
        self.ensure_initialized()?;

        let branch = self.refs().current_branch()?;
        let divergences = self.inspector().divergences()?;

        writeln!(self.writer(), "On branch {}", branch)?;
        if self.refs().tip_of(&branch)?.is_none() {
            writeln!(self.writer(), "No commits yet")?;
        }

        if divergences.is_empty() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        } else {
            writeln!(self.writer())?;
            for divergence in &divergences {
                writeln!(self.writer(), "{}", divergence)?;
            }
        }

        Ok(divergences)
    }
}
