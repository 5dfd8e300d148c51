//! Repository access abstraction layer
//!
//! The resolution engine needs exactly four read capabilities from a repository:
//! list annotated tags with their target commit, read commit parents, read commit
//! messages, and report whether the working tree has local modifications. The
//! [Repository] trait captures those (plus tag creation for releases) so the engine
//! can run against a real repository or an in-memory history.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for tests
//!
//! ```rust
//! # use auto_semver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> auto_semver::Result<()> {
//! if let Some(head) = repo.head_commit()? {
//!     let commit = repo.commit(head)?;
//!     println!("{} has {} parent(s)", commit.id, commit.parents.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRef;
use crate::error::Result;
use git2::Oid;

/// A tag as stored in the repository, before any version parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Short tag name (without `refs/tags/`)
    pub name: String,
    /// Commit the tag resolves to, `None` when it points at a tree or blob
    pub target: Option<Oid>,
    /// Whether the tag is an annotated tag object
    pub annotated: bool,
}

/// Repository capabilities required by the resolution engine
///
/// Every read method maps underlying failures to
/// [crate::error::SemverError::RepositoryAccess]; none of them mutate the repository.
pub trait Repository {
    /// Commit currently checked out, or `None` when the repository has no commits yet
    fn head_commit(&self) -> Result<Option<Oid>>;

    /// Every tag in the repository, annotated or not
    ///
    /// Lightweight tags are reported with `annotated: false` so callers can
    /// explain why they were skipped.
    fn tags(&self) -> Result<Vec<TagRef>>;

    /// Read one commit's message and parents
    ///
    /// # Errors
    /// Fails with `RepositoryAccess` if the object is missing or is not a commit.
    fn commit(&self, id: Oid) -> Result<CommitRef>;

    /// Whether the working tree or index differs from the checked-out commit
    ///
    /// # Arguments
    /// * `include_untracked` - count untracked files as modifications
    fn is_dirty(&self, include_untracked: bool) -> Result<bool>;

    /// Create an annotated tag named `name` on `target`
    ///
    /// # Errors
    /// Fails if the tag already exists or the target cannot be found.
    fn create_annotated_tag(&self, name: &str, target: Oid, message: &str) -> Result<()>;
}
