//! storage layer for gitlog
//!
//! this module is the commit-graph side of the log table: it opens
//! repositories, resolves branches, decodes commits and walks history.
//! The upper layers (session, system tables) use this API and never touch
//! git2 directly.
//!
//!  # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     GitRepository                           │
//! │      (High-level API: branches, commits, history)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              │                               │
//!              ▼                               ▼
//!       ┌─────────────┐                 ┌─────────────┐
//!       │    refs     │                 │   commit    │
//!       │ (branches)  │                 │  (history)  │
//!       └─────────────┘                 └─────────────┘
//!                                              │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │  traversal  │
//!                                       │ (ancestors) │
//!                                       └─────────────┘
//!  ```
//!
//! # Usage
//!
//! ```ignore
//! use gitlog::storage::{BranchName, GitRepository};
//!
//! let repo = GitRepository::open_or_init("./my_database")?;
//! let head = repo.commit(&BranchName::main(), "first")?;
//! let history = repo.history(head, None)?;
//! ```

mod commit;
mod error;
mod refs;
mod repository;
mod traversal;
mod types;

pub use commit::{Commit, CommitBuilder, CommitMeta, StoredCommit};
pub use error::{StorageError, StorageResult};
pub use repository::GitRepository;
pub use traversal::{AncestorTraversal, TimeSortedTraversal, TraversalLimit};
pub use types::{BranchName, CommitId, GitSignature, InvalidNameError, TreeId};
