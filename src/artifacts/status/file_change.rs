use colored::Colorize;
use std::path::PathBuf;

const LABEL_WIDTH: usize = 8;

/// How a working-tree file diverges from what is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeType {
    Deleted,
    Modified,
    Untracked,
}

impl From<&ChangeType> for &str {
    fn from(change: &ChangeType) -> Self {
        match change {
            ChangeType::Deleted => "deleted:    ",
            ChangeType::Modified => "modified:   ",
            ChangeType::Untracked => "untracked:  ",
        }
    }
}

/// What the working tree was compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeSource {
    /// A file recorded in the current branch's tip commit
    LastCommit,
    /// A file recorded in the staging index
    Index,
    /// A file present only in the working tree
    Workspace,
}

impl ChangeSource {
    fn describe(&self) -> &'static str {
        match self {
            ChangeSource::LastCommit => "since last commit",
            ChangeSource::Index => "since staged",
            ChangeSource::Workspace => "not tracked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub path: PathBuf,
    pub change: ChangeType,
    pub source: ChangeSource,
}

impl Divergence {
    pub fn new(path: PathBuf, change: ChangeType, source: ChangeSource) -> Self {
        Divergence {
            path,
            change,
            source,
        }
    }

    /// Plain one-line description, e.g. `modified: notes.txt (since last commit)`
    pub fn summary(&self) -> String {
        let label: &str = (&self.change).into();
        format!(
            "{} {} ({})",
            label.trim_end(),
            self.path.display(),
            self.source.describe()
        )
    }
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = (&self.change).into();
        let colored_label = match self.change {
            ChangeType::Deleted | ChangeType::Modified => label.red(),
            ChangeType::Untracked => label.yellow(),
        };
        write!(
            f,
            "{:>width$}{}{} ({})",
            "",
            colored_label,
            self.path.display(),
            self.source.describe(),
            width = LABEL_WIDTH
        )
    }
}
