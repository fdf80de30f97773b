//! Entry points for running a table scan.

use crate::context::QueryContext;
use crate::table::Table;

use super::error::ExecuteResult;
use super::operators::{LimitOperator, Operator, TableScan};
use super::result::ResultSet;

/// Build the operator tree for a full scan of `table`, optionally capped at
/// `limit` rows. Rows are pulled lazily.
pub fn scan<'t>(table: &'t dyn Table, ctx: QueryContext, limit: Option<usize>) -> Box<dyn Operator + 't> {
    log::debug!("{}: scanning {}", ctx, table);
    let scan: Box<dyn Operator + 't> = Box::new(TableScan::new(table, ctx));
    match limit {
        Some(limit) => Box::new(LimitOperator::new(scan, limit)),
        None => scan,
    }
}

/// Run a scan to completion and buffer its rows.
pub fn collect(table: &dyn Table, ctx: QueryContext, limit: Option<usize>) -> ExecuteResult<ResultSet> {
    let columns = table
        .schema()
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let mut result = ResultSet::new(columns);

    let mut op = scan(table, ctx, limit);
    while let Some(row) = op.next_row()? {
        result.push(row);
    }
    op.close()?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use crate::catalog::Value;
    use crate::executor::ExecuteError;
    use crate::session::Session;
    use crate::storage::{BranchName, GitRepository, GitSignature};
    use crate::system::SessionLogTable;
    use crate::table::TableError;

    fn session_with_history(dir: &TempDir, messages: &[&str]) -> Arc<Session> {
        let repo = GitRepository::init(dir.path()).unwrap();
        for (i, message) in messages.iter().enumerate() {
            let when = Utc.timestamp_opt(1_000 * (i as i64 + 1), 0).unwrap();
            let sig = GitSignature::new("Ada", "ada@example.com").at(when);
            repo.commit_as(&BranchName::main(), message, &sig).unwrap();
        }

        let session = Arc::new(Session::new());
        session.register("db", repo, None).unwrap();
        session
    }

    #[test]
    fn test_collect_log_newest_first() {
        let dir = TempDir::new().unwrap();
        let session = session_with_history(&dir, &["first", "second", "third"]);
        let table = SessionLogTable::for_session(session, "db").unwrap();

        let result = collect(&table, QueryContext::new(), None).unwrap();
        assert_eq!(
            result.columns,
            vec!["commit_hash", "committer", "email", "date", "message"]
        );

        let messages: Vec<_> = result
            .iter()
            .map(|row| row.get(4).and_then(Value::as_text).unwrap().to_string())
            .collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_collect_with_limit() {
        let dir = TempDir::new().unwrap();
        let session = session_with_history(&dir, &["first", "second", "third"]);
        let table = SessionLogTable::for_session(session, "db").unwrap();

        let result = collect(&table, QueryContext::new(), Some(2)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(1).and_then(|r| r.get(4)), Some(&Value::from("second")));
    }

    #[test]
    fn test_collect_empty_repository_fails() {
        let dir = TempDir::new().unwrap();
        let session = session_with_history(&dir, &[]);
        let table = SessionLogTable::for_session(session, "db").unwrap();

        let err = collect(&table, QueryContext::new(), None).unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::Table(TableError::TraversalFailure { .. })
        ));
    }
}
