use thiserror::Error;

/// Unified error type for auto-semver operations
#[derive(Error, Debug)]
pub enum SemverError {
    /// History could not be read (corrupt data, missing objects, unreadable refs).
    #[error("Repository access failed: {0}")]
    RepositoryAccess(#[from] git2::Error),

    #[error("Repository has no commits, nothing to version")]
    NoCommits,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Working tree has uncommitted changes, commit or stash them before releasing")]
    DirtyWorkingTree,

    #[error("Current commit is already released as '{tag}'")]
    AlreadyReleased { tag: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in auto-semver
pub type Result<T> = std::result::Result<T, SemverError>;

impl SemverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemverError::Version(msg.into())
    }

    /// Wrap a message as a repository access failure.
    pub fn repository(msg: impl AsRef<str>) -> Self {
        SemverError::RepositoryAccess(git2::Error::from_str(msg.as_ref()))
    }

    /// Whether the error means the repository itself cannot support resolution.
    pub fn is_fatal_repository_error(&self) -> bool {
        matches!(
            self,
            SemverError::RepositoryAccess(_) | SemverError::NoCommits
        )
    }
}
