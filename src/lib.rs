//! gitlog - commit history as a queryable table
//!
//! A repository's commit history is exposed as a read-only virtual table
//! named `git_log`, one row per commit reachable from a branch head,
//! newest first. Rows are computed from the commit graph on demand and
//! pulled one at a time through a small scan pipeline.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gitlog::context::QueryContext;
//! use gitlog::executor;
//! use gitlog::session::{DatabaseConfig, Session};
//! use gitlog::system::SessionLogTable;
//!
//! let session = Arc::new(Session::new());
//! let name = session.open_database(&DatabaseConfig::new("./repo")).unwrap();
//! let table = SessionLogTable::for_session(session, name).unwrap();
//!
//! let rows = executor::collect(&table, QueryContext::new(), Some(10)).unwrap();
//! for row in rows.iter() {
//!     println!("{:?}", row);
//! }
//! ```

pub mod catalog;
pub mod context;
pub mod executor;
pub mod session;
pub mod storage;
pub mod system;
pub mod table;
