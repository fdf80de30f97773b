//! Per-query context handed to tables and collaborators.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle for one query execution.
///
/// Every call the engine makes into a table, and every call a table makes
/// into its collaborators, carries the context of the query it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    query_id: u64,
}

impl QueryContext {
    /// Create a context with a fresh, process-unique query id.
    pub fn new() -> Self {
        Self {
            query_id: NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn query_id(&self) -> u64 {
        self.query_id
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query#{}", self.query_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_ids_are_unique() {
        let a = QueryContext::new();
        let b = QueryContext::new();
        assert_ne!(a.query_id(), b.query_id());
        assert_eq!(a.to_string(), format!("query#{}", a.query_id()));
    }
}
