use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::collections::HashSet;

/// Lazy walk from a tip commit to the root, following parent links
///
/// Each step loads exactly one commit from the database. The walk cannot be restarted
/// mid-way; ask the repository for a new one to start again from the tip.
pub struct RevList<'r> {
    repository: &'r Repository,
    current_commit_oid: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(repository: &'r Repository, tip: Option<ObjectId>) -> Self {
        RevList {
            repository,
            current_commit_oid: tip,
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        if !self.visited.insert(commit_oid.clone()) {
            return Some(Err(VcsError::corrupt(
                &commit_oid,
                "parent chain loops back on itself",
            )
            .into()));
        }

        match self.repository.database().parse_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // the walk ends after reporting the failure
            Err(err) => Some(Err(err)),
        }
    }
}
