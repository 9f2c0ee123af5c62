//! Ignore rules consulted when staging
//!
//! Patterns come from `.myvcsignore` at the working-tree root, one glob per line. Blank
//! lines and lines starting with `#` are skipped. A pattern matches a path when it
//! matches the whole relative path, the file name, or any leading directory of the path,
//! so `target` ignores everything below `target/`.

use crate::artifacts::core::path_to_slash;
use anyhow::Context;
use glob::{MatchOptions, Pattern};
use std::path::Path;

/// Name of the ignore file in the working-tree root
pub const IGNORE_FILE_NAME: &str = ".myvcsignore";

/// Predicate the staging step uses to skip paths
pub trait IgnorePredicate {
    fn is_ignored(&self, path: &Path) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct IgnoreRules {
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                Pattern::new(line.trim_end_matches('/'))
                    .with_context(|| format!("invalid ignore pattern '{line}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(IgnoreRules { patterns })
    }

    /// Load the rules for a working tree; a missing ignore file means no rules
    pub fn load(workspace_root: &Path) -> anyhow::Result<Self> {
        let ignore_path = workspace_root.join(IGNORE_FILE_NAME);
        if !ignore_path.is_file() {
            return Ok(IgnoreRules::default());
        }

        let content = std::fs::read_to_string(&ignore_path)
            .with_context(|| format!("Unable to read {}", ignore_path.display()))?;

        Self::parse(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl IgnorePredicate for IgnoreRules {
    fn is_ignored(&self, path: &Path) -> bool {
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::default()
        };

        let full_path = path_to_slash(path);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let leading_dirs = path
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(path_to_slash)
            .collect::<Vec<_>>();
        let dir_names = path
            .parent()
            .map(|parent| {
                parent
                    .iter()
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        self.patterns.iter().any(|pattern| {
            pattern.matches_with(&full_path, options)
                || pattern.matches_with(&file_name, options)
                || leading_dirs
                    .iter()
                    .chain(dir_names.iter())
                    .any(|dir| pattern.matches_with(dir, options))
        })
    }
}
