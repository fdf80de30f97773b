//! The commit log system table.
//!
//! `git_log` shows one row per commit reachable from the head of the bound
//! database's current branch, in the order the ancestor traversal returns
//! them.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{Column, DataType, Row, Schema, Value};
use crate::context::QueryContext;
use crate::session::{BranchHeadResolver, DatabaseResolver, Session};
use crate::storage::{AncestorTraversal, Commit, TimeSortedTraversal, TraversalLimit};
use crate::table::{Partition, PartitionIter, RowIter, Table, TableError, TableResult};

/// Name of the commit log system table.
pub const LOG_TABLE_NAME: &str = "git_log";

/// `LogTable` wired to a shared [`Session`] and the revwalk traversal.
pub type SessionLogTable = LogTable<Arc<Session>, Arc<Session>, TimeSortedTraversal>;

const _: fn() = || {
    fn assert_table<T: Table>() {}
    assert_table::<SessionLogTable>();
};

/// Read-only table over the commit history of one database.
pub struct LogTable<D, B, T> {
    db_name: String,
    databases: D,
    heads: B,
    traversal: T,
}

impl<D, B, T> LogTable<D, B, T>
where
    D: DatabaseResolver<Handle = T::Graph>,
    B: BranchHeadResolver<Commit = T::Commit>,
    T: AncestorTraversal,
{
    /// Create a log table bound to `db_name`.
    ///
    /// Fails with [`TableError::DatabaseNotFound`] if the database isn't
    /// known to `databases`.
    pub fn new(db_name: impl Into<String>, databases: D, heads: B, traversal: T) -> TableResult<Self> {
        let db_name = db_name.into();
        if databases.resolve_database(&db_name).is_none() {
            return Err(TableError::DatabaseNotFound(db_name));
        }

        Ok(Self {
            db_name,
            databases,
            heads,
            traversal,
        })
    }

    /// Name of the database this table reads.
    pub fn database(&self) -> &str {
        &self.db_name
    }
}

impl SessionLogTable {
    /// Log table for a database registered in `session`.
    pub fn for_session(session: Arc<Session>, db_name: impl Into<String>) -> TableResult<Self> {
        Self::new(db_name, session.clone(), session, TimeSortedTraversal)
    }
}

/// The fixed schema of the log table.
pub fn log_table_schema() -> Schema {
    Schema::new(vec![
        Column::new("commit_hash", DataType::Text, LOG_TABLE_NAME).primary_key(),
        Column::new("committer", DataType::Text, LOG_TABLE_NAME),
        Column::new("email", DataType::Text, LOG_TABLE_NAME),
        Column::new("date", DataType::Timestamp, LOG_TABLE_NAME),
        Column::new("message", DataType::Text, LOG_TABLE_NAME),
    ])
}

impl<D, B, T> fmt::Display for LogTable<D, B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LOG_TABLE_NAME)
    }
}

impl<D, B, T> Table for LogTable<D, B, T>
where
    D: DatabaseResolver<Handle = T::Graph>,
    B: BranchHeadResolver<Commit = T::Commit>,
    T: AncestorTraversal,
    T::Commit: 'static,
{
    fn name(&self) -> &str {
        LOG_TABLE_NAME
    }

    fn schema(&self) -> Schema {
        log_table_schema()
    }

    /// The table is unpartitioned.
    fn partitions(&self, _ctx: &QueryContext) -> TableResult<PartitionIter> {
        Ok(PartitionIter::single())
    }

    fn partition_rows(&self, ctx: &QueryContext, _partition: &Partition) -> TableResult<Box<dyn RowIter>> {
        let graph = self
            .databases
            .resolve_database(&self.db_name)
            .ok_or_else(|| TableError::DatabaseNotFound(self.db_name.clone()))?;

        let iter: LogIter<T::Commit> = LogIter::new(ctx, &self.db_name, &graph, &self.heads, &self.traversal)?;
        Ok(Box::new(iter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    Streaming,
    Exhausted,
}

/// Row iterator over a materialized commit sequence.
///
/// The whole ancestor list is fetched once, up front; rows are then decoded
/// one commit at a time.
pub struct LogIter<C> {
    commits: Vec<C>,
    cursor: usize,
    state: IterState,
}

impl<C: Commit> LogIter<C> {
    /// Resolve the branch head of `db_name` and materialize its full history.
    pub fn new<B, T>(
        ctx: &QueryContext,
        db_name: &str,
        graph: &T::Graph,
        heads: &B,
        traversal: &T,
    ) -> TableResult<Self>
    where
        B: BranchHeadResolver<Commit = C>,
        T: AncestorTraversal<Commit = C>,
    {
        let head = heads
            .resolve_branch_head(ctx, db_name)
            .map_err(|e| TableError::traversal(db_name, e))?;

        let commits = traversal
            .time_sorted_ancestors(ctx, graph, &head, TraversalLimit::Unbounded)
            .map_err(|e| TableError::traversal(db_name, e))?;

        log::debug!("{}: {} commits in {} history", ctx, commits.len(), db_name);

        Ok(Self::from_commits(commits))
    }

    /// Iterator over an already materialized sequence.
    pub fn from_commits(commits: Vec<C>) -> Self {
        Self {
            commits,
            cursor: 0,
            state: IterState::Streaming,
        }
    }

    /// Commits not yet read.
    pub fn remaining(&self) -> usize {
        match self.state {
            IterState::Streaming => self.commits.len() - self.cursor,
            IterState::Exhausted => 0,
        }
    }

    fn decode(commit: &C) -> Result<Row, crate::storage::StorageError> {
        let meta = commit.metadata()?;
        let hash = commit.hash()?;

        Ok(Row::new(vec![
            Value::Text(hash.to_string()),
            Value::Text(meta.name),
            Value::Text(meta.email),
            Value::Timestamp(meta.timestamp),
            Value::Text(meta.description),
        ]))
    }
}

impl<C: Commit> RowIter for LogIter<C> {
    fn next_row(&mut self) -> TableResult<Option<Row>> {
        if self.state == IterState::Exhausted {
            return Ok(None);
        }

        let Some(commit) = self.commits.get(self.cursor) else {
            log::trace!("log stream exhausted after {} rows", self.cursor);
            self.state = IterState::Exhausted;
            return Ok(None);
        };

        match Self::decode(commit) {
            Ok(row) => {
                self.cursor += 1;
                Ok(Some(row))
            }
            Err(source) => {
                self.state = IterState::Exhausted;
                Err(TableError::MetadataDecodeFailure {
                    position: self.cursor,
                    source,
                })
            }
        }
    }

    fn close(&mut self) -> TableResult<()> {
        Ok(())
    }
}

impl<C: Commit> Iterator for LogIter<C> {
    type Item = TableResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

impl<C: Commit> std::iter::FusedIterator for LogIter<C> {}
