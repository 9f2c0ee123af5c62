use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::is_hidden;
use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::VcsError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the control directory in the working-tree root
pub const CONTROL_DIR: &str = ".myvcs";

/// Directory (inside the control directory) holding one file per commit
pub const COMMITS_DIR: &str = "commits";

/// Name of the staging index file inside the control directory
pub const INDEX_FILE: &str = "index";

/// Skip rule for the untracked-file walk: hidden entries and the control directory
pub fn skip_hidden_and_control(path: &Path) -> bool {
    is_hidden(path) || path.starts_with(CONTROL_DIR)
}

/// Handle on one repository, opened for the duration of a single operation
///
/// Nothing read through the handle is cached: the index, refs and commits are loaded
/// from disk whenever they are needed, so a handle never observes stale state written
/// earlier by the same process.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let control_path = path.join(CONTROL_DIR);
        let database = Database::new(control_path.join(COMMITS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(control_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> Box<Path> {
        self.path.join(CONTROL_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.control_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(VcsError::NotInitialized.into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// A fresh, not yet loaded handle on the staging index
    pub fn index(&self) -> Index {
        Index::new(self.control_path().join(INDEX_FILE).into_boxed_path())
    }

    /// The staging index as currently persisted
    pub fn load_index(&self) -> anyhow::Result<Index> {
        let mut index = self.index();
        index.rehydrate()?;
        Ok(index)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn ignore_rules(&self) -> anyhow::Result<IgnoreRules> {
        IgnoreRules::load(&self.path)
    }

    /// Divergence checks using the default skip rule for the untracked-file walk
    pub fn inspector(&'_ self) -> Inspector<'_, fn(&Path) -> bool> {
        Inspector::new(self, skip_hidden_and_control as fn(&Path) -> bool)
    }

    /// Lazy walk over the history ending at `tip`
    pub fn rev_list(&'_ self, tip: Option<ObjectId>) -> RevList<'_> {
        RevList::new(self, tip)
    }
}
