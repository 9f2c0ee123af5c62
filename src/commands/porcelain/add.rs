use crate::areas::repository::{CONTROL_DIR, Repository, skip_hidden_and_control};
use crate::artifacts::core::path_to_slash;
use crate::artifacts::ignore::{IGNORE_FILE_NAME, IgnorePredicate};
use crate::errors::VcsError;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Repository {
    /// Stage files, expanding directories to every non-hidden file below them
    ///
    /// Every path is resolved and checked before anything is staged, so a missing path or
    /// a file name that cannot be recorded leaves the index untouched.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let resolved = paths
            .iter()
            .map(|path| self.workspace().resolve(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let files = resolved
            .iter()
            .map(|path| self.workspace().list_files(Some(path.as_path()), skip_hidden_and_control))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<PathBuf>>();

        let ignore_rules = self.ignore_rules()?;

        if let Some(file) = files.iter().find(|file| {
            file.to_str().is_none()
                && !file.starts_with(CONTROL_DIR)
                && !ignore_rules.is_ignored(file)
        }) {
            return Err(VcsError::UnsupportedPath(file.clone()).into());
        }

        let mut index = self.load_index()?;

        for file in files {
            let display_path = path_to_slash(&file);

            if file.starts_with(CONTROL_DIR) {
                writeln!(
                    self.writer(),
                    "{}",
                    format!("Skipped {display_path}: inside the repository control directory")
                        .yellow()
                )?;
                continue;
            }

            if ignore_rules.is_ignored(&file) {
                debug!(path = %display_path, "path matches an ignore rule");
                writeln!(
                    self.writer(),
                    "{}",
                    format!("Ignored {display_path} (matches {IGNORE_FILE_NAME})").yellow()
                )?;
                continue;
            }

            let oid = self.workspace().hash_file(&file)?;
            index.add(file, oid);

            writeln!(self.writer(), "Staged {display_path}")?;
        }

        if index.has_changes() {
            index.write_updates()?;
        }

        info!(staged = index.len(), "updated staging index");
        Ok(())
    }
}
