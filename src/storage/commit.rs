//! Commit creation, decoding and history traversal
//!
//! commits are the rows of the log table. this module handles:
//! - strict decoding of commit metadata (no silent defaults)
//! - the `Commit` handle the table reads rows from
//! - commit creation for tooling and fixtures
//! - walking history from a starting commit

use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository, Revwalk, Sort};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::repository::GitRepository;
use crate::storage::types::{CommitId, GitSignature, TreeId};

/// decoded metadata of a single commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    pub name: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl CommitMeta {
    /// decode metadata from a git2::Commit
    ///
    /// fails if the author or message is not valid utf-8, or the timestamp
    /// can't be represented.
    pub(crate) fn decode(commit: &git2::Commit<'_>) -> StorageResult<Self> {
        let id = commit.id();
        let author = commit.author();

        let name = author
            .name()
            .ok_or_else(|| StorageError::corrupted(id, "author name is not valid utf-8"))?;
        let email = author
            .email()
            .ok_or_else(|| StorageError::corrupted(id, "author email is not valid utf-8"))?;
        // the raw message keeps leading blank lines that message() strips
        let description = commit
            .message_raw()
            .ok_or_else(|| StorageError::corrupted(id, "message is not valid utf-8"))?;

        // committer time, which is what the revwalk sorts on
        let seconds = commit.time().seconds();
        let timestamp = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| StorageError::corrupted(id, format!("timestamp {} out of range", seconds)))?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            description: description.to_string(),
        })
    }
}

/// A commit as seen by the log table.
///
/// Implementations hand out metadata and hash on request; decoding may fail
/// for a damaged object, which is why both accessors return a `Result`.
pub trait Commit {
    /// Author name, author email, timestamp and message.
    fn metadata(&self) -> StorageResult<CommitMeta>;

    /// Content hash identifying the commit.
    fn hash(&self) -> StorageResult<CommitId>;
}

/// A commit stored in a [`GitRepository`].
///
/// Holds only the repository handle and the id; metadata is decoded each
/// time it's requested.
#[derive(Clone)]
pub struct StoredCommit {
    repo: GitRepository,
    id: CommitId,
}

impl StoredCommit {
    pub fn new(repo: GitRepository, id: CommitId) -> Self {
        Self { repo, id }
    }

    pub fn id(&self) -> CommitId {
        self.id
    }
}

impl std::fmt::Debug for StoredCommit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCommit")
            .field("repo", &self.repo.path())
            .field("id", &self.id)
            .finish()
    }
}

impl Commit for StoredCommit {
    fn metadata(&self) -> StorageResult<CommitMeta> {
        self.repo.with_repo(|repo| {
            let commit = repo
                .find_commit(self.id.raw())
                .map_err(|_| StorageError::CommitNotFound(self.id.to_string()))?;
            CommitMeta::decode(&commit)
        })
    }

    fn hash(&self) -> StorageResult<CommitId> {
        Ok(self.id)
    }
}

/// builder for creating commits with a fluent interface
pub struct CommitBuilder<'a> {
    repo: &'a Repository,
    tree_id: Option<TreeId>,
    parents: Vec<CommitId>,
    message: String,
    signature: GitSignature,
    update_ref: Option<String>,
}

impl<'a> CommitBuilder<'a> {
    /// create a new CommitBuilder
    pub fn new(repo: &'a Repository) -> Self {
        Self {
            repo,
            tree_id: None,
            parents: Vec::new(),
            message: String::new(),
            signature: GitSignature::gitlog(),
            update_ref: None,
        }
    }

    /// set the tree for this commit
    pub fn tree(mut self, tree_id: TreeId) -> Self {
        self.tree_id = Some(tree_id);
        self
    }

    /// add a parent commit
    pub fn parent(mut self, parent: CommitId) -> Self {
        self.parents.push(parent);
        self
    }

    /// set the commit message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// set the author/committer signature
    pub fn signature(mut self, signature: GitSignature) -> Self {
        self.signature = signature;
        self
    }

    /// update a ref (branch) to point to this commit
    pub fn update_ref(mut self, refname: impl Into<String>) -> Self {
        self.update_ref = Some(refname.into());
        self
    }

    /// create the commit and return its ID
    pub fn commit(self) -> StorageResult<CommitId> {
        let tree_id = self
            .tree_id
            .ok_or_else(|| StorageError::Internal("commit requires a tree".to_string()))?;

        let tree = self.repo.find_tree(tree_id.raw())?;
        let sig = self.signature.to_git2_signature()?;

        // collect parent commits
        let parent_commits: Vec<git2::Commit<'_>> = self
            .parents
            .iter()
            .map(|id| self.repo.find_commit(id.raw()))
            .collect::<Result<_, _>>()?;

        let parent_refs: Vec<&git2::Commit<'_>> = parent_commits.iter().collect();

        let oid = self.repo.commit(
            self.update_ref.as_deref(),
            &sig,
            &sig,
            &self.message,
            &tree,
            &parent_refs,
        )?;

        Ok(CommitId::new(oid))
    }
}

/// write an empty tree and return its id
pub fn create_empty_tree(repo: &Repository) -> StorageResult<TreeId> {
    let oid = repo.treebuilder(None)?.write()?;
    Ok(TreeId::new(oid))
}

/// the tree of a commit, or the empty tree when there is no commit
pub(crate) fn tree_or_empty(repo: &Repository, commit: Option<CommitId>) -> StorageResult<TreeId> {
    match commit {
        Some(id) => {
            let commit = repo
                .find_commit(id.raw())
                .map_err(|_| StorageError::CommitNotFound(id.to_string()))?;
            Ok(TreeId::new(commit.tree_id()))
        }
        None => create_empty_tree(repo),
    }
}

/// iterate over commit history starting from a commit
///
/// newest first; parents are never emitted before their children.
pub struct HistoryIterator<'repo> {
    revwalk: Revwalk<'repo>,
}

impl<'repo> HistoryIterator<'repo> {
    /// create a new history iterator
    pub fn new(repo: &'repo Repository, start: CommitId) -> StorageResult<Self> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
        revwalk
            .push(start.raw())
            .map_err(|_| StorageError::CommitNotFound(start.to_string()))?;

        Ok(Self { revwalk })
    }
}

impl<'repo> Iterator for HistoryIterator<'repo> {
    type Item = StorageResult<CommitId>;

    fn next(&mut self) -> Option<Self::Item> {
        let next: Result<Oid, git2::Error> = self.revwalk.next()?;
        Some(next.map(CommitId::new).map_err(StorageError::Git))
    }
}

/// get history for a commit
pub fn history(repo: &Repository, start: CommitId) -> StorageResult<HistoryIterator<'_>> {
    HistoryIterator::new(repo, start)
}
