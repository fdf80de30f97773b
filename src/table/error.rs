//! Table errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors a table or its row iterator can return to the engine.
#[derive(Debug, Error)]
pub enum TableError {
    /// The bound database has no handle in the session.
    #[error("database not found: {0}")]
    DatabaseNotFound(String),

    /// Branch head resolution or the ancestor walk failed; no rows were produced.
    #[error("commit traversal failed for database '{db_name}': {source}")]
    TraversalFailure {
        db_name: String,
        #[source]
        source: StorageError,
    },

    /// A commit couldn't be decoded mid-stream; the stream ends here.
    #[error("failed to decode commit at position {position}: {source}")]
    MetadataDecodeFailure {
        position: usize,
        #[source]
        source: StorageError,
    },
}

impl TableError {
    pub(crate) fn traversal(db_name: &str, source: StorageError) -> Self {
        TableError::TraversalFailure {
            db_name: db_name.to_string(),
            source,
        }
    }
}
