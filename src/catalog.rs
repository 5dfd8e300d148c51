//! Tag catalog: the set of annotated tags that parse as semantic versions

use crate::domain::{TagCandidate, TagPattern};
use crate::error::Result;
use crate::git::Repository;
use std::fmt;
use tracing::debug;

/// Why a tag was left out of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Lightweight tags carry no tagger or timestamp and are never release markers
    Lightweight,
    /// Name does not follow `[v]MAJOR.MINOR.PATCH[-PRE][+BUILD]`
    Unparseable,
    /// Tag points at a tree or blob
    NotACommit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Lightweight => write!(f, "lightweight tag"),
            SkipReason::Unparseable => write!(f, "not a semantic version"),
            SkipReason::NotACommit => write!(f, "does not point at a commit"),
        }
    }
}

/// A tag excluded from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTag {
    pub name: String,
    pub reason: SkipReason,
}

/// Version tags found in a repository. Candidates carry no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    pub candidates: Vec<TagCandidate>,
    pub skipped: Vec<SkippedTag>,
}

impl TagCatalog {
    /// Read every tag and keep the annotated ones whose names parse as versions.
    ///
    /// Skipped tags are recorded, never reported as errors.
    ///
    /// # Errors
    /// Fails with `RepositoryAccess` when the tag list or a tag object cannot be read.
    pub fn collect<R: Repository + ?Sized>(repo: &R) -> Result<Self> {
        TagCatalog::collect_with(repo, &TagPattern::default())
    }

    /// Same as [`TagCatalog::collect`], also recognising names written with `pattern`.
    pub fn collect_with<R: Repository + ?Sized>(repo: &R, pattern: &TagPattern) -> Result<Self> {
        let mut catalog = TagCatalog::default();

        for tag in repo.tags()? {
            let reason = if !tag.annotated {
                Some(SkipReason::Lightweight)
            } else {
                match tag.target {
                    None => Some(SkipReason::NotACommit),
                    Some(target) => match TagCandidate::parse_with_prefix(
                        tag.name.as_str(),
                        target,
                        &pattern.prefix,
                    ) {
                        Some(candidate) => {
                            catalog.candidates.push(candidate);
                            None
                        }
                        None => Some(SkipReason::Unparseable),
                    },
                }
            };

            if let Some(reason) = reason {
                debug!(tag = %tag.name, %reason, "skipping tag");
                catalog.skipped.push(SkippedTag {
                    name: tag.name,
                    reason,
                });
            }
        }

        debug!(
            candidates = catalog.candidates.len(),
            skipped = catalog.skipped.len(),
            "collected tag catalog"
        );

        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemanticVersion;
    use crate::git::MockRepository;

    #[test]
    fn test_collect_keeps_annotated_version_tags() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        let c2 = repo.commit_on_head("feat: more");
        repo.add_annotated_tag("v1.0.0", c1);
        repo.add_annotated_tag("2.0.0-rc.1", c2);

        let catalog = TagCatalog::collect(&repo).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.skipped.is_empty());

        let rc = catalog
            .candidates
            .iter()
            .find(|c| c.name == "2.0.0-rc.1")
            .unwrap();
        assert_eq!(rc.target, c2);
        assert_eq!(rc.version, SemanticVersion::parse("2.0.0-rc.1").unwrap());
    }

    #[test]
    fn test_collect_ignores_lightweight_tags() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_lightweight_tag("v9.9.9", c1);

        let catalog = TagCatalog::collect(&repo).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.skipped,
            vec![SkippedTag {
                name: "v9.9.9".to_string(),
                reason: SkipReason::Lightweight,
            }]
        );
    }

    #[test]
    fn test_collect_skips_unparseable_and_non_commit_tags() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("deploy-prod", c1);
        repo.add_annotated_tag("v1.2", c1);
        repo.add_non_commit_tag("v3.0.0");
        repo.add_annotated_tag("v1.2.3", c1);

        let catalog = TagCatalog::collect(&repo).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.candidates[0].name, "v1.2.3");

        let reasons: Vec<SkipReason> = catalog.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::Unparseable,
                SkipReason::Unparseable,
                SkipReason::NotACommit
            ]
        );
    }

    #[test]
    fn test_collect_empty_repository() {
        let repo = MockRepository::new();
        let catalog = TagCatalog::collect(&repo).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.skipped.is_empty());
    }

    #[test]
    fn test_collect_with_custom_prefix() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("rel/1.4.0", c1);
        repo.add_annotated_tag("v1.3.0", c1);

        let default = TagCatalog::collect(&repo).unwrap();
        assert_eq!(default.len(), 1);

        let catalog = TagCatalog::collect_with(&repo, &TagPattern::new("rel/")).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog
            .candidates
            .iter()
            .any(|c| c.version == SemanticVersion::new(1, 4, 0)));
    }

    #[test]
    fn test_doubled_prefix_is_unparseable() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("vv1.2.3", c1);
        repo.add_annotated_tag("vV1.2.3", c1);

        let catalog = TagCatalog::collect_with(&repo, &TagPattern::new("v")).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::Unparseable));
        assert_eq!(catalog.skipped.len(), 2);
    }
}
