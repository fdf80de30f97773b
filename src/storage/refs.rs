//! Branch and HEAD resolution.
//!
//! The log table only ever reads refs: it needs the commit a branch (or
//! HEAD) points at. Writing refs is left to `CommitBuilder::update_ref`.

use git2::{ErrorCode, Repository};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{BranchName, CommitId};

/// Reads Git references.
pub struct RefManager;

impl RefManager {
    /// The commit at the tip of `branch`.
    pub fn resolve_branch(repo: &Repository, branch: &BranchName) -> StorageResult<CommitId> {
        let tip = repo
            .find_reference(&branch.as_ref_path())
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|_| StorageError::RefNotFound(branch.to_string()))?;

        Ok(CommitId::new(tip.id()))
    }

    /// The commit HEAD points at. An unborn HEAD means the repository has
    /// no commits yet.
    pub fn head_commit(repo: &Repository) -> StorageResult<CommitId> {
        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Err(StorageError::EmptyRepository),
            Err(e) => return Err(e.into()),
        };

        Ok(CommitId::new(head.peel_to_commit()?.id()))
    }

    /// Point HEAD at a branch, which may not exist yet (unborn).
    pub fn set_head(repo: &Repository, branch: &BranchName) -> StorageResult<()> {
        repo.set_head(&branch.as_ref_path())?;
        Ok(())
    }
}
