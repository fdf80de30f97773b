//! Session environment: which databases exist and where their heads are.
//!
//! Tables don't look the session up from an ambient context. They are
//! handed a [`DatabaseResolver`] and a [`BranchHeadResolver`] when they're
//! built; [`Session`] implements both.

mod config;
mod manager;

use std::sync::Arc;

use crate::context::QueryContext;
use crate::storage::{Commit, StorageResult};

pub use config::DatabaseConfig;
pub use manager::{Session, SessionError, SessionResult};

/// Maps a database name to a handle on its commit graph.
pub trait DatabaseResolver {
    type Handle;

    /// `None` if the name isn't known to the session.
    fn resolve_database(&self, db_name: &str) -> Option<Self::Handle>;
}

/// Maps a database name to the commit at the head of its current branch.
pub trait BranchHeadResolver {
    type Commit: Commit;

    fn resolve_branch_head(&self, ctx: &QueryContext, db_name: &str) -> StorageResult<Self::Commit>;
}

impl<R: DatabaseResolver + ?Sized> DatabaseResolver for Arc<R> {
    type Handle = R::Handle;

    fn resolve_database(&self, db_name: &str) -> Option<Self::Handle> {
        (**self).resolve_database(db_name)
    }
}

impl<R: BranchHeadResolver + ?Sized> BranchHeadResolver for Arc<R> {
    type Commit = R::Commit;

    fn resolve_branch_head(&self, ctx: &QueryContext, db_name: &str) -> StorageResult<Self::Commit> {
        (**self).resolve_branch_head(ctx, db_name)
    }
}
