//! The session: a registry of named databases and their current branch.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use super::config::DatabaseConfig;
use super::{BranchHeadResolver, DatabaseResolver};
use crate::context::QueryContext;
use crate::storage::{BranchName, GitRepository, StorageError, StorageResult, StoredCommit};

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("database already registered: {0}")]
    DuplicateDatabase(String),

    #[error("database not registered: {0}")]
    DatabaseNotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

struct DatabaseEntry {
    repo: GitRepository,
    branch: Option<BranchName>,
}

/// Named databases visible to the queries of one session.
///
/// Share it behind an `Arc`; both resolver traits are implemented for
/// `Arc<Session>` as well.
#[derive(Default)]
pub struct Session {
    databases: RwLock<HashMap<String, DatabaseEntry>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the repository described by `config` and register it.
    ///
    /// Returns the name it was registered under.
    pub fn open_database(&self, config: &DatabaseConfig) -> SessionResult<String> {
        let name = config.database_name().ok_or_else(|| {
            SessionError::InvalidConfig(format!(
                "cannot derive a database name from {}",
                config.path.display()
            ))
        })?;

        let repo = if config.create_if_missing {
            GitRepository::open_or_init(&config.path)?
        } else {
            GitRepository::open(&config.path)?
        };

        self.register(&name, repo, config.branch.clone())?;
        Ok(name)
    }

    /// Register an already opened repository.
    pub fn register(
        &self,
        name: &str,
        repo: GitRepository,
        branch: Option<BranchName>,
    ) -> SessionResult<()> {
        let mut databases = self.databases.write();
        if databases.contains_key(name) {
            return Err(SessionError::DuplicateDatabase(name.to_string()));
        }

        log::debug!(
            "registered database '{}' at {} (branch: {})",
            name,
            repo.path().display(),
            branch.as_ref().map_or("HEAD", |b| b.as_str())
        );
        databases.insert(name.to_string(), DatabaseEntry { repo, branch });
        Ok(())
    }

    /// Remove a database. Returns whether it was registered.
    pub fn remove_database(&self, name: &str) -> bool {
        self.databases.write().remove(name).is_some()
    }

    /// Switch the branch a database's log is read from.
    pub fn set_branch(&self, name: &str, branch: Option<BranchName>) -> SessionResult<()> {
        let mut databases = self.databases.write();
        let entry = databases
            .get_mut(name)
            .ok_or_else(|| SessionError::DatabaseNotFound(name.to_string()))?;
        entry.branch = branch;
        Ok(())
    }

    /// Registered database names, sorted.
    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl DatabaseResolver for Session {
    type Handle = GitRepository;

    fn resolve_database(&self, db_name: &str) -> Option<GitRepository> {
        self.databases.read().get(db_name).map(|entry| entry.repo.clone())
    }
}

impl BranchHeadResolver for Session {
    type Commit = StoredCommit;

    fn resolve_branch_head(&self, _ctx: &QueryContext, db_name: &str) -> StorageResult<StoredCommit> {
        let (repo, branch) = {
            let databases = self.databases.read();
            let entry = databases
                .get(db_name)
                .ok_or_else(|| StorageError::RefNotFound(format!("{}: no such database", db_name)))?;
            (entry.repo.clone(), entry.branch.clone())
        };

        let head = match &branch {
            Some(branch) => repo.resolve_branch(branch)?,
            None => repo.head()?,
        };
        Ok(StoredCommit::new(repo, head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Commit;
    use tempfile::TempDir;

    fn repo_with_commits(dir: &TempDir, messages: &[&str]) -> GitRepository {
        let repo = GitRepository::init(dir.path()).unwrap();
        for message in messages {
            repo.commit(&BranchName::main(), message).unwrap();
        }
        repo
    }

    #[test]
    fn test_register_and_resolve() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_commits(&dir, &["one"]);
        let session = Session::new();

        session.register("db", repo, None).unwrap();
        assert!(session.resolve_database("db").is_some());
        assert!(session.resolve_database("other").is_none());
        assert_eq!(session.database_names(), vec!["db".to_string()]);
    }

    #[test]
    fn test_duplicate_register() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_commits(&dir, &["one"]);
        let session = Session::new();

        session.register("db", repo.clone(), None).unwrap();
        let result = session.register("db", repo, None);
        assert!(matches!(result, Err(SessionError::DuplicateDatabase(_))));
    }

    #[test]
    fn test_open_database_from_config() {
        let dir = TempDir::new().unwrap();
        repo_with_commits(&dir, &["one"]);
        let session = Session::new();

        let name = session
            .open_database(&DatabaseConfig::new(dir.path()).name("history"))
            .unwrap();
        assert_eq!(name, "history");
        assert!(session.resolve_database("history").is_some());
    }

    #[test]
    fn test_open_database_missing_repo() {
        let dir = TempDir::new().unwrap();
        let session = Session::new();

        let config = DatabaseConfig::new(dir.path().join("absent")).name("absent");
        assert!(matches!(
            session.open_database(&config),
            Err(SessionError::Storage(StorageError::NotInitialized(_)))
        ));

        let created = session
            .open_database(&config.clone().create_if_missing(true))
            .unwrap();
        assert_eq!(created, "absent");
    }

    #[test]
    fn test_branch_head_follows_configured_branch() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_commits(&dir, &["one", "two"]);
        let main_head = repo.head().unwrap();

        let feature = BranchName::new("feature").unwrap();
        let feature_head = repo.commit(&feature, "three").unwrap();

        let session = Session::new();
        session.register("db", repo, None).unwrap();
        let ctx = QueryContext::new();

        let head = session.resolve_branch_head(&ctx, "db").unwrap();
        assert_eq!(head.hash().unwrap(), main_head);

        session.set_branch("db", Some(feature)).unwrap();
        let head = session.resolve_branch_head(&ctx, "db").unwrap();
        assert_eq!(head.hash().unwrap(), feature_head);
    }

    #[test]
    fn test_branch_head_errors() {
        let dir = TempDir::new().unwrap();
        let repo = GitRepository::init(dir.path()).unwrap();
        let session = Session::new();
        session.register("empty", repo, None).unwrap();
        let ctx = QueryContext::new();

        assert!(matches!(
            session.resolve_branch_head(&ctx, "empty"),
            Err(StorageError::EmptyRepository)
        ));
        assert!(session.resolve_branch_head(&ctx, "missing").is_err());
        assert!(matches!(
            session.set_branch("missing", None),
            Err(SessionError::DatabaseNotFound(_))
        ));
    }

    #[test]
    fn test_remove_database() {
        let dir = TempDir::new().unwrap();
        let repo = repo_with_commits(&dir, &["one"]);
        let session = Session::new();
        session.register("db", repo, None).unwrap();

        assert!(session.remove_database("db"));
        assert!(!session.remove_database("db"));
        assert!(session.resolve_database("db").is_none());
    }
}
