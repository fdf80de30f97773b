//! Time-ordered ancestor traversal.
//!
//! The log table never walks the graph itself; it asks an
//! [`AncestorTraversal`] for the ordered ancestor list of a start commit and
//! streams whatever order comes back.

use crate::context::QueryContext;
use crate::storage::commit::{Commit, StoredCommit};
use crate::storage::error::StorageResult;
use crate::storage::repository::GitRepository;

/// How many ancestors a traversal may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalLimit {
    /// Walk the whole reachable history.
    Unbounded,
    /// Stop after this many commits.
    AtMost(usize),
}

impl TraversalLimit {
    fn as_option(self) -> Option<usize> {
        match self {
            TraversalLimit::Unbounded => None,
            TraversalLimit::AtMost(n) => Some(n),
        }
    }
}

/// Produces the time-sorted ancestors of a commit, the commit itself first.
pub trait AncestorTraversal {
    /// Handle to the commit graph being walked.
    type Graph;
    /// Commit type the traversal hands out.
    type Commit: Commit;

    fn time_sorted_ancestors(
        &self,
        ctx: &QueryContext,
        graph: &Self::Graph,
        start: &Self::Commit,
        limit: TraversalLimit,
    ) -> StorageResult<Vec<Self::Commit>>;
}

/// Revwalk-backed traversal over a [`GitRepository`].
///
/// Newest first by committer time; a commit is never listed after one of
/// its ancestors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSortedTraversal;

impl AncestorTraversal for TimeSortedTraversal {
    type Graph = GitRepository;
    type Commit = StoredCommit;

    fn time_sorted_ancestors(
        &self,
        ctx: &QueryContext,
        graph: &GitRepository,
        start: &StoredCommit,
        limit: TraversalLimit,
    ) -> StorageResult<Vec<StoredCommit>> {
        let ids = graph.history(start.hash()?, limit.as_option())?;
        log::trace!("{}: walked {} commits from {}", ctx, ids.len(), start.id().short());

        Ok(ids
            .into_iter()
            .map(|id| StoredCommit::new(graph.clone(), id))
            .collect())
    }
}
