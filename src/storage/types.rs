//! core type-safe wrappers around git primitives for the storage layer.

use std::fmt;
use std::fmt::Formatter;

use chrono::{DateTime, Utc};
use git2::Oid;

/// This makes sure we don't accidentally pass a tree or blob ID where a
/// commit ID is expected. The inner Oid is only accessible within the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitId(pub(crate) Oid);

impl CommitId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    /// raw Oid (for internal use only)
    pub(crate) fn raw(&self) -> Oid {
        self.0
    }

    /// parse CommitId from a hex string
    pub fn from_hex(hex: &str) -> Result<Self, git2::Error> {
        Oid::from_str(hex).map(CommitId)
    }

    /// short form of the commit ID
    pub fn short(&self) -> String {
        self.0.to_string()[..7].to_string()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Git tree identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub(crate) Oid);

impl TreeId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    pub(crate) fn raw(&self) -> Oid {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a validated branch name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// the main branch name
    pub const MAIN: &'static str = "main";

    /// create a new BranchName
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidNameError> {
        let name = name.into();
        // git is more permissive, we only reject what would escape refs/heads
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        if name.contains("..") || name.ends_with('/') || name.starts_with('/') {
            return Err(InvalidNameError::InvalidPath(name));
        }
        if let Some((position, char)) = name
            .chars()
            .enumerate()
            .find(|(_, c)| c.is_whitespace() || matches!(c, '~' | '^' | ':' | '?' | '*' | '[' | '\\'))
        {
            return Err(InvalidNameError::InvalidCharacter { char, position });
        }
        Ok(Self(name))
    }

    /// create the main branch reference
    pub fn main() -> Self {
        Self(Self::MAIN.to_string())
    }

    /// get the full ref path (e.g., "refs/heads/main")
    pub fn as_ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }

    /// get the short name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// git signature (author/committer info)
#[derive(Debug, Clone)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    /// fixed signature time; `None` means "now"
    pub when: Option<DateTime<Utc>>,
}

impl GitSignature {
    /// create a new signature
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when: None,
        }
    }

    /// default signature for gitlog tooling
    pub fn gitlog() -> Self {
        Self::new("gitlog", "gitlog@localhost")
    }

    /// pin the signature to a fixed point in time
    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.when = Some(when);
        self
    }

    /// convert to git2::Signature
    pub(crate) fn to_git2_signature(&self) -> Result<git2::Signature<'static>, git2::Error> {
        match self.when {
            Some(when) => git2::Signature::new(
                &self.name,
                &self.email,
                &git2::Time::new(when.timestamp(), 0),
            ),
            None => git2::Signature::now(&self.name, &self.email),
        }
    }
}

impl Default for GitSignature {
    fn default() -> Self {
        Self::gitlog()
    }
}

/// error type for invalid names (branches, databases)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    Empty,
    InvalidCharacter { char: char, position: usize },
    InvalidPath(String),
}

impl fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name cannot be empty"),
            Self::InvalidCharacter { char, position } => {
                write!(f, "invalid character '{}' at position {}", char, position)
            }
            Self::InvalidPath(path) => write!(f, "invalid path: '{}'", path),
        }
    }
}

impl std::error::Error for InvalidNameError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_branch_name_valid() {
        assert!(BranchName::new("main").is_ok());
        assert!(BranchName::new("feature/log-table").is_ok());
        assert!(BranchName::new("release-1.2").is_ok());
    }

    #[test]
    fn test_branch_name_invalid() {
        assert_eq!(BranchName::new(""), Err(InvalidNameError::Empty));
        assert!(BranchName::new("/leading").is_err());
        assert!(BranchName::new("trailing/").is_err());
        assert!(BranchName::new("a..b").is_err());
        assert_eq!(
            BranchName::new("has space"),
            Err(InvalidNameError::InvalidCharacter { char: ' ', position: 3 })
        );
    }

    #[test]
    fn test_branch_name_main() {
        let branch = BranchName::main();
        assert_eq!(branch.as_str(), "main");
        assert_eq!(branch.as_ref_path(), "refs/heads/main");
    }

    #[test]
    fn test_commit_id_hex() {
        let hex = "0123456789abcdef0123456789abcdef01234567";
        let id = CommitId::from_hex(hex).unwrap();
        assert_eq!(id.to_string(), hex);
        assert_eq!(id.short(), "0123456");
        assert!(CommitId::from_hex("not-hex").is_err());
    }

    #[test]
    fn test_signature_fixed_time() {
        let when = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let sig = GitSignature::new("Ada", "ada@example.com").at(when);
        let git_sig = sig.to_git2_signature().unwrap();
        assert_eq!(git_sig.name(), Some("Ada"));
        assert_eq!(git_sig.when().seconds(), when.timestamp());
    }
}
