//! Error kinds surfaced by repository operations
//!
//! Every kind here means "the operation did not complete and the repository was left
//! unchanged". They are raised inside `anyhow::Error` so that I/O failures can keep their
//! context chain, and callers that care about the kind can `downcast_ref::<VcsError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("no repository found, run 'myvcs init' first")]
    NotInitialized,

    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("path {} cannot be tracked, file names must be valid UTF-8", .0.display())]
    UnsupportedPath(PathBuf),

    #[error("nothing to commit, the staging index is empty")]
    NothingToCommit,

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("branch '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    #[error("no commits yet on the current branch")]
    NoCommitsYet,

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("corrupt object {name}: {reason}")]
    CorruptObject { name: String, reason: String },

    #[error("uncommitted changes ({0}), commit or discard them before switching branches")]
    UncommittedChanges(String),
}

impl VcsError {
    pub fn corrupt(name: impl ToString, reason: impl ToString) -> Self {
        VcsError::CorruptObject {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Returns the typed kind carried by an error, if any.
pub fn kind_of(error: &anyhow::Error) -> Option<&VcsError> {
    error.downcast_ref::<VcsError>()
}
