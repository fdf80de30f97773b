//! The contract between a query engine and the tables it scans.
//!
//! A table describes itself with a name and a fixed [`Schema`], splits its
//! data into partitions, and hands out one [`RowIter`] per partition. The
//! engine pulls rows until the iterator reports end of stream, then closes
//! it. It may also close an iterator early, at any point.

mod error;

use std::fmt;

use crate::catalog::{Row, Schema};
use crate::context::QueryContext;

pub use error::{TableError, TableResult};

/// A table the engine can scan.
///
/// `Display` renders the same logical name as [`Table::name`].
pub trait Table: fmt::Display {
    fn name(&self) -> &str;

    fn schema(&self) -> Schema;

    fn partitions(&self, ctx: &QueryContext) -> TableResult<PartitionIter>;

    fn partition_rows(&self, ctx: &QueryContext, partition: &Partition) -> TableResult<Box<dyn RowIter>>;
}

/// Pull-based row stream for one partition.
pub trait RowIter {
    /// `Ok(Some(row))` for the next row, `Ok(None)` at end of stream.
    fn next_row(&mut self) -> TableResult<Option<Row>>;

    /// Release the stream. Must succeed in any state, any number of times.
    fn close(&mut self) -> TableResult<()>;
}

impl<I: RowIter + ?Sized> RowIter for Box<I> {
    fn next_row(&mut self) -> TableResult<Option<Row>> {
        (**self).next_row()
    }

    fn close(&mut self) -> TableResult<()> {
        (**self).close()
    }
}

/// Opaque unit of scan work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    key: Vec<u8>,
}

impl Partition {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// The partition of a table that isn't partitioned.
    pub fn single() -> Self {
        Self::new(b"single".to_vec())
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

/// Iterator over the partitions of a table.
#[derive(Debug)]
pub struct PartitionIter {
    partitions: std::vec::IntoIter<Partition>,
}

impl PartitionIter {
    pub fn new(partitions: Vec<Partition>) -> Self {
        Self {
            partitions: partitions.into_iter(),
        }
    }

    /// Exactly one degenerate partition.
    pub fn single() -> Self {
        Self::new(vec![Partition::single()])
    }
}

impl Iterator for PartitionIter {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        self.partitions.next()
    }
}

impl ExactSizeIterator for PartitionIter {
    fn len(&self) -> usize {
        self.partitions.len()
    }
}
