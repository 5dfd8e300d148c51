//! Release tagging: turn the resolved increment into an annotated tag at HEAD

use crate::config::Config;
use crate::domain::{SemanticVersion, TagCandidate, TagPattern, VersionBump};
use crate::error::{Result, SemverError};
use crate::git::Repository;
use crate::resolver::VersionResolver;
use git2::Oid;
use tracing::info;

/// Everything needed to create a release tag, computed without touching the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub previous: Option<TagCandidate>,
    pub next: SemanticVersion,
    pub increment: VersionBump,
    pub tag_name: String,
    pub target: Oid,
    pub message: String,
}

/// Default annotation for a release tag.
pub fn default_message(tag_name: &str) -> String {
    format!("Release version: {}", tag_name)
}

/// Plan the next release of HEAD.
///
/// `increment` overrides the classifier's decision. The next version never carries
/// pre-release or build identifiers.
///
/// # Errors
/// * `DirtyWorkingTree` - the working tree has uncommitted changes
/// * `AlreadyReleased` - HEAD already carries a release tag
/// * `Version` - the computed tag name is already taken
pub fn plan_release<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    increment: Option<VersionBump>,
    message: Option<String>,
) -> Result<ReleasePlan> {
    let resolved = VersionResolver::new(config.clone()).resolve(repo)?;

    if resolved.is_dirty {
        return Err(SemverError::DirtyWorkingTree);
    }

    if let Some(tag) = resolved.base_tag.as_ref().filter(|_| resolved.is_exact_tag()) {
        return Err(SemverError::AlreadyReleased {
            tag: tag.name.clone(),
        });
    }

    let increment = match increment {
        Some(VersionBump::None) | None => resolved.bump.bump,
        Some(explicit) => explicit,
    };
    let next = resolved.base_version().bump(increment)?;
    let tag_name = TagPattern::new(config.tag_prefix.clone()).format(&next);

    if repo.tags()?.iter().any(|tag| tag.name == tag_name) {
        return Err(SemverError::version(format!(
            "tag '{}' already exists on another commit",
            tag_name
        )));
    }

    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message(&tag_name));

    Ok(ReleasePlan {
        previous: resolved.base_tag,
        next,
        increment,
        tag_name,
        target: resolved.commit,
        message,
    })
}

/// Create the planned tag. Never pushes.
pub fn create_release<R: Repository + ?Sized>(repo: &R, plan: &ReleasePlan) -> Result<()> {
    repo.create_annotated_tag(&plan.tag_name, plan.target, &plan.message)?;
    info!(tag = %plan.tag_name, target = %plan.target, "created release tag");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::resolver::resolve;

    #[test]
    fn test_plan_uses_classified_increment() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("v1.2.0", c1);
        repo.commit_on_head("feat: new flag");
        let head = repo.commit_on_head("fix: flag parsing");

        let plan = plan_release(&repo, &Config::default(), None, None).unwrap();
        assert_eq!(plan.next, SemanticVersion::new(1, 3, 0));
        assert_eq!(plan.increment, VersionBump::Minor);
        assert_eq!(plan.tag_name, "v1.3.0");
        assert_eq!(plan.target, head);
        assert_eq!(plan.message, "Release version: v1.3.0");
        assert_eq!(plan.previous.unwrap().name, "v1.2.0");
    }

    #[test]
    fn test_explicit_increment_overrides_classifier() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("v1.2.0", c1);
        repo.commit_on_head("fix: small");

        let plan = plan_release(&repo, &Config::default(), Some(VersionBump::Major), None).unwrap();
        assert_eq!(plan.tag_name, "v2.0.0");
    }

    #[test]
    fn test_first_release_without_tags() {
        let mut repo = MockRepository::new();
        repo.commit_on_head("initial import");

        let config = Config {
            tag_prefix: "release-".to_string(),
            ..Config::default()
        };
        let plan = plan_release(&repo, &config, Some(VersionBump::Minor), Some("first".into())).unwrap();
        assert_eq!(plan.tag_name, "release-0.1.0");
        assert_eq!(plan.message, "first");
        assert!(plan.previous.is_none());
    }

    #[test]
    fn test_dirty_tree_refused() {
        let mut repo = MockRepository::new();
        repo.commit_on_head("init");
        repo.set_modified(true);

        assert!(matches!(
            plan_release(&repo, &Config::default(), None, None),
            Err(SemverError::DirtyWorkingTree)
        ));
    }

    #[test]
    fn test_already_tagged_head_refused() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("v0.4.0", c1);

        match plan_release(&repo, &Config::default(), Some(VersionBump::Patch), None) {
            Err(SemverError::AlreadyReleased { tag }) => assert_eq!(tag, "v0.4.0"),
            other => panic!("expected AlreadyReleased, got {:?}", other),
        }
    }

    #[test]
    fn test_existing_tag_name_refused() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("v1.0.0", c1);
        repo.add_lightweight_tag("v1.0.1", c1);
        repo.commit_on_head("fix: again");

        assert!(matches!(
            plan_release(&repo, &Config::default(), None, None),
            Err(SemverError::Version(_))
        ));
    }

    #[test]
    fn test_blank_message_falls_back_to_default() {
        let mut repo = MockRepository::new();
        repo.commit_on_head("init");

        let plan = plan_release(&repo, &Config::default(), None, Some("   ".into())).unwrap();
        assert_eq!(plan.message, "Release version: v0.0.1");
    }

    #[test]
    fn test_create_release_tags_head() {
        let mut repo = MockRepository::new();
        let c1 = repo.commit_on_head("init");
        repo.add_annotated_tag("v1.0.0", c1);
        repo.commit_on_head("feat: more");

        let plan = plan_release(&repo, &Config::default(), None, None).unwrap();
        create_release(&repo, &plan).unwrap();

        assert!(repo.tag_names().contains(&"v1.1.0".to_string()));
        let resolved = resolve(&repo).unwrap();
        assert_eq!(resolved.version.to_string(), "1.1.0");
        assert!(resolved.is_exact_tag());
    }
}
