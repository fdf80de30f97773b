//! Storage layer error types
//!
//! All errors that can occur during storage operations are defined here
//! We use `thiserror` for ergonomic error definition and better error messages

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::types::InvalidNameError;

/// the main error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// error from the underlying Git library
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// invalid branch name
    #[error("invalid name: {0}")]
    InvalidName(#[from] InvalidNameError),

    /// the specified branch/ref was not found
    #[error("ref not found: {0}")]
    RefNotFound(String),

    /// repo is not initialized
    #[error("repository not initialized: {0}")]
    NotInitialized(PathBuf),

    /// repo is empty (no commits)
    #[error("repository is empty: no commits found")]
    EmptyRepository,

    /// the commit was not found
    #[error("commit not found: {0}")]
    CommitNotFound(String),

    /// the commit object exists but its metadata can't be decoded
    #[error("corrupted commit {id}: {reason}")]
    CorruptedCommit { id: String, reason: String },

    /// internal error that shouldn't happen
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// check if this error indicates the resource doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::RefNotFound(_)
                | StorageError::CommitNotFound(_)
                | StorageError::EmptyRepository
        )
    }

    pub(crate) fn corrupted(id: impl ToString, reason: impl Into<String>) -> Self {
        StorageError::CorruptedCommit {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
