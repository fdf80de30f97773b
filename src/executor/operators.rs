//! Volcano-style operators for query execution.
//!
//! Each operator implements the iterator model where rows are pulled
//! one at a time through the tree.

use crate::catalog::{Row, Schema};
use crate::context::QueryContext;
use crate::table::{PartitionIter, RowIter, Table};

use super::error::ExecuteResult;

/// Trait for all query operators.
pub trait Operator {
    /// Get the next row, or None if exhausted.
    fn next_row(&mut self) -> ExecuteResult<Option<Row>>;

    /// Stop early and release whatever the operator holds open.
    fn close(&mut self) -> ExecuteResult<()>;
}

/// Scan operator - reads every partition of a table in turn.
///
/// Partitions are enumerated on the first pull. Each partition's row
/// iterator is closed as soon as it is drained, fails, or the scan is closed.
pub struct TableScan<'t> {
    table: &'t dyn Table,
    ctx: QueryContext,
    schema: Schema,
    partitions: Option<PartitionIter>,
    current: Option<Box<dyn RowIter>>,
}

impl<'t> TableScan<'t> {
    pub fn new(table: &'t dyn Table, ctx: QueryContext) -> Self {
        Self {
            schema: table.schema(),
            table,
            ctx,
            partitions: None,
            current: None,
        }
    }

    /// Open the row iterator of the next partition. False when none are left.
    fn advance_partition(&mut self) -> ExecuteResult<bool> {
        if self.partitions.is_none() {
            self.partitions = Some(self.table.partitions(&self.ctx)?);
        }

        let next = self.partitions.as_mut().and_then(|p| p.next());
        match next {
            Some(partition) => {
                self.current = Some(self.table.partition_rows(&self.ctx, &partition)?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn pull(&mut self) -> ExecuteResult<Option<Row>> {
        loop {
            let Some(iter) = self.current.as_mut() else {
                if !self.advance_partition()? {
                    return Ok(None);
                }
                continue;
            };

            match iter.next_row()? {
                Some(row) => {
                    self.schema.validate_row(&row)?;
                    return Ok(Some(row));
                }
                None => {
                    if let Some(mut done) = self.current.take() {
                        done.close()?;
                    }
                }
            }
        }
    }
}

impl<'t> Operator for TableScan<'t> {
    fn next_row(&mut self) -> ExecuteResult<Option<Row>> {
        let result = self.pull();
        if result.is_err() {
            // the failure is what the caller needs to see, not a close error
            let _ = self.close();
        }
        result
    }

    fn close(&mut self) -> ExecuteResult<()> {
        if let Some(mut iter) = self.current.take() {
            iter.close()?;
        }
        Ok(())
    }
}

/// Limit operator - restricts number of rows.
///
/// Closes its source once the limit is reached instead of draining it.
pub struct LimitOperator<'t> {
    source: Box<dyn Operator + 't>,
    limit: usize,
    current: usize,
    closed: bool,
}

impl<'t> LimitOperator<'t> {
    pub fn new(source: Box<dyn Operator + 't>, limit: usize) -> Self {
        Self {
            source,
            limit,
            current: 0,
            closed: false,
        }
    }
}

impl<'t> Operator for LimitOperator<'t> {
    fn next_row(&mut self) -> ExecuteResult<Option<Row>> {
        if self.closed {
            return Ok(None);
        }

        if self.current < self.limit {
            if let Some(row) = self.source.next_row()? {
                self.current += 1;
                return Ok(Some(row));
            }
            return Ok(None);
        }

        self.close()?;
        Ok(None)
    }

    fn close(&mut self) -> ExecuteResult<()> {
        self.closed = true;
        self.source.close()
    }
}
