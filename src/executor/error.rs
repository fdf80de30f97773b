//! Query execution errors.

use thiserror::Error;

use crate::catalog::SchemaError;
use crate::table::TableError;

/// Result type for query execution.
pub type ExecuteResult<T> = Result<T, ExecuteError>;

/// Query execution errors.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
