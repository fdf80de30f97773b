//! Per-database configuration.

use std::path::{Path, PathBuf};

use crate::storage::BranchName;

/// How a database is opened and registered in a [`Session`](super::Session).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the repository directory.
    pub path: PathBuf,
    /// Logical name; defaults to the directory name.
    pub name: Option<String>,
    /// Branch whose head the log is read from; `None` follows HEAD.
    pub branch: Option<BranchName>,
    /// Initialize an empty repository if none exists at `path`.
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            name: None,
            branch: None,
            create_if_missing: false,
        }
    }
}

impl DatabaseConfig {
    /// Create a new configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the logical database name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Read from a fixed branch instead of HEAD.
    pub fn branch(mut self, branch: BranchName) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Set create_if_missing flag.
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// The name the database is registered under.
    ///
    /// Falls back to the last path component, canonicalized so that `.`
    /// resolves to the directory's real name.
    pub fn database_name(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        let canonical = self.path.canonicalize().ok();
        let path: &Path = canonical.as_deref().unwrap_or(&self.path);
        path.file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DatabaseConfig::new("/tmp/repo")
            .name("history")
            .branch(BranchName::main())
            .create_if_missing(true);

        assert_eq!(config.path, PathBuf::from("/tmp/repo"));
        assert_eq!(config.database_name().as_deref(), Some("history"));
        assert_eq!(config.branch, Some(BranchName::main()));
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_name_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo_dir = dir.path().join("my_db");
        std::fs::create_dir(&repo_dir).unwrap();

        let config = DatabaseConfig::new(&repo_dir);
        assert_eq!(config.database_name().as_deref(), Some("my_db"));
    }
}
