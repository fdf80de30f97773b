//!   Core Git repository wrapper.
//!
//!  This is the central component of the storage layer. It wraps `git2::Repository`
//!   with thread-safe access and provides the high-level operations that the
//!  session and the log table use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use git2::Repository;
use parking_lot::RwLock;

use crate::storage::commit::{self, CommitBuilder};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::refs::RefManager;
use crate::storage::types::{BranchName, CommitId, GitSignature};

/// The main Git repository wrapper.
///
/// Clone this to share it: clones point at the same underlying repository.
#[derive(Clone)]
pub struct GitRepository {
    inner: Arc<GitRepositoryInner>,
}

struct GitRepositoryInner {
    repo: RwLock<Repository>,
    path: PathBuf,
    signature: RwLock<GitSignature>,
}

impl GitRepository {
    fn from_repository(repo: Repository, path: &Path) -> Self {
        Self {
            inner: Arc::new(GitRepositoryInner {
                repo: RwLock::new(repo),
                path: path.to_path_buf(),
                signature: RwLock::new(GitSignature::gitlog()),
            }),
        }
    }

    /// Open an existing repository.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| StorageError::NotInitialized(path.to_path_buf()))?;
        Ok(Self::from_repository(repo, path))
    }

    /// Initialize a new, empty repository with HEAD on `main`.
    pub fn init(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = Repository::init(path)?;
        RefManager::set_head(&repo, &BranchName::main())?;
        Ok(Self::from_repository(repo, path))
    }

    /// Open or initialize a repository.
    pub fn open_or_init(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if path.join(".git").exists() {
            Self::open(path)
        } else {
            Self::init(path)
        }
    }

    /// Get the repository path.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Set the signature used by [`GitRepository::commit`].
    pub fn set_signature(&self, signature: GitSignature) {
        *self.inner.signature.write() = signature;
    }

    /// Execute a function with read access to the repository.
    pub fn with_repo<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Repository) -> StorageResult<T>,
    {
        let repo = self.inner.repo.read();
        f(&repo)
    }

    /// Execute a function with write access to the repository.
    pub fn with_repo_mut<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Repository) -> StorageResult<T>,
    {
        let repo = self.inner.repo.write();
        f(&repo)
    }

    // ==================== Read Operations ====================

    /// Get the current HEAD commit.
    pub fn head(&self) -> StorageResult<CommitId> {
        self.with_repo(RefManager::head_commit)
    }

    /// Get the commit ID for a branch.
    pub fn resolve_branch(&self, branch: &BranchName) -> StorageResult<CommitId> {
        self.with_repo(|repo| RefManager::resolve_branch(repo, branch))
    }

    /// Get commit history, newest first.
    pub fn history(&self, from: CommitId, limit: Option<usize>) -> StorageResult<Vec<CommitId>> {
        self.with_repo(|repo| {
            let iter = commit::history(repo, from)?;
            match limit {
                Some(n) => iter.take(n).collect(),
                None => iter.collect(),
            }
        })
    }

    // ==================== Write Operations ====================

    /// Commit on top of a branch with the repository signature.
    ///
    /// The new commit reuses the parent's tree. An unborn branch gets a root
    /// commit with an empty tree.
    pub fn commit(&self, branch: &BranchName, message: &str) -> StorageResult<CommitId> {
        let signature = self.inner.signature.read().clone();
        self.commit_as(branch, message, &signature)
    }

    /// Commit on top of a branch with an explicit signature.
    pub fn commit_as(
        &self,
        branch: &BranchName,
        message: &str,
        signature: &GitSignature,
    ) -> StorageResult<CommitId> {
        self.with_repo_mut(|repo| {
            let parent = match RefManager::resolve_branch(repo, branch) {
                Ok(id) => Some(id),
                Err(StorageError::RefNotFound(_)) => None,
                Err(e) => return Err(e),
            };
            let tree_id = commit::tree_or_empty(repo, parent)?;

            let mut builder = CommitBuilder::new(repo)
                .tree(tree_id)
                .message(message)
                .signature(signature.clone())
                .update_ref(branch.as_ref_path());
            if let Some(parent) = parent {
                builder = builder.parent(parent);
            }
            builder.commit()
        })
    }
}
