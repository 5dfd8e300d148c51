//! Version resolver: ties the catalog, walker and classifier into one version

use crate::analyzer::{BumpClassifier, BumpDecision};
use crate::catalog::{SkippedTag, TagCatalog};
use crate::config::Config;
use crate::domain::{short_id, CommitRef, SemanticVersion, TagCandidate, TagPattern};
use crate::error::{Result, SemverError};
use crate::git::Repository;
use crate::walker::nearest_tag;
use git2::Oid;
use std::fmt;
use tracing::{debug, info};

/// Result of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: SemanticVersion,
    /// Working tree had local modifications when resolving HEAD
    pub is_dirty: bool,
    /// Commits between the base tag and the resolved commit
    pub distance_from_tag: usize,
    /// Tag the version was derived from, `None` before the first release
    pub base_tag: Option<TagCandidate>,
    pub bump: BumpDecision,
    /// Commit that was versioned
    pub commit: Oid,
    /// Commits since the base tag, children before parents
    pub commits: Vec<CommitRef>,
    /// Tags left out of the catalog, for diagnostics
    pub skipped_tags: Vec<SkippedTag>,
}

impl ResolvedVersion {
    /// Version the increment was applied to
    pub fn base_version(&self) -> SemanticVersion {
        self.base_tag
            .as_ref()
            .map(|tag| tag.version.clone())
            .unwrap_or_else(SemanticVersion::initial)
    }

    /// Walked commit with the given id
    pub fn find_commit(&self, id: Oid) -> Option<&CommitRef> {
        self.commits.iter().find(|commit| commit.id == id)
    }

    /// True when the resolved commit is exactly a tagged release
    pub fn is_exact_tag(&self) -> bool {
        self.base_tag.is_some() && self.distance_from_tag == 0
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Resolves the semantic version of a commit from tags and history.
///
/// Holds configuration only; every call re-reads the repository.
pub struct VersionResolver {
    config: Config,
    classifier: BumpClassifier,
}

impl VersionResolver {
    pub fn new(config: Config) -> Self {
        let classifier = BumpClassifier::new(config.bump.clone());
        VersionResolver { config, classifier }
    }

    /// Resolve the version of the checked-out commit.
    ///
    /// # Errors
    /// * `NoCommits` - the repository has no commits
    /// * `RepositoryAccess` - tags, history, or status could not be read
    pub fn resolve<R: Repository + ?Sized>(&self, repo: &R) -> Result<ResolvedVersion> {
        let head = repo.head_commit()?.ok_or(SemverError::NoCommits)?;
        self.resolve_commit(repo, head, true)
    }

    /// Resolve the version of an arbitrary commit.
    ///
    /// The working tree only describes HEAD, so the dirty marker is applied only
    /// when `start` is the checked-out commit.
    pub fn resolve_at<R: Repository + ?Sized>(&self, repo: &R, start: Oid) -> Result<ResolvedVersion> {
        let is_head = repo.head_commit()? == Some(start);
        self.resolve_commit(repo, start, is_head)
    }

    fn resolve_commit<R: Repository + ?Sized>(
        &self,
        repo: &R,
        start: Oid,
        check_worktree: bool,
    ) -> Result<ResolvedVersion> {
        let pattern = TagPattern::new(self.config.tag_prefix.as_str());
        let catalog = TagCatalog::collect_with(repo, &pattern)?;
        let walk = nearest_tag(repo, start, &catalog.candidates)?;
        let decision = self.classifier.classify(&walk.commits);
        let distance = walk.distance();

        let base = walk
            .tag
            .as_ref()
            .map(|tag| tag.version.clone())
            .unwrap_or_else(SemanticVersion::initial);

        debug!(
            base = %base,
            bump = %decision.bump,
            distance,
            "classified commits since base version"
        );

        let mut version = base.bump(decision.bump)?;

        if distance > 0 {
            version = version.with_pre_release(&[
                distance.to_string(),
                short_id(start, self.config.short_id_length),
            ])?;
        }

        let is_dirty = check_worktree && repo.is_dirty(self.config.untracked_is_dirty)?;
        if is_dirty {
            version = version.with_build_identifier(&self.config.dirty_marker)?;
        }

        info!(version = %version, commit = %start, dirty = is_dirty, "resolved version");

        Ok(ResolvedVersion {
            version,
            is_dirty,
            distance_from_tag: distance,
            base_tag: walk.tag,
            bump: decision,
            commit: start,
            commits: walk.commits,
            skipped_tags: catalog.skipped,
        })
    }
}

impl Default for VersionResolver {
    fn default() -> Self {
        VersionResolver::new(Config::default())
    }
}

/// Resolve HEAD of `repo` with the default configuration.
pub fn resolve<R: Repository + ?Sized>(repo: &R) -> Result<ResolvedVersion> {
    VersionResolver::default().resolve(repo)
}
