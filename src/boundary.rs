use crate::catalog::{SkipReason, SkippedTag};
use crate::resolver::ResolvedVersion;
use std::fmt;

/// Non-fatal conditions noticed while resolving a version.
/// These are reported to the user but never change the result.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No version tag is reachable, so the version counts from 0.0.0
    NoVersionTag { current_commit_hash: String },
    /// Tag name cannot be parsed as a semantic version
    UnparsableTag { tag: String },
    /// Tag looks like a version but is lightweight
    LightweightTag { tag: String },
    /// Tag points at a tree or blob instead of a commit
    NonCommitTag { tag: String },
    /// Working tree has uncommitted changes
    DirtyWorkingTree,
}

impl BoundaryWarning {
    /// Warnings worth showing for a resolution
    pub fn collect(resolved: &ResolvedVersion) -> Vec<BoundaryWarning> {
        let mut warnings: Vec<BoundaryWarning> = resolved
            .skipped_tags
            .iter()
            .filter_map(BoundaryWarning::from_skipped)
            .collect();

        if resolved.base_tag.is_none() {
            warnings.push(BoundaryWarning::NoVersionTag {
                current_commit_hash: resolved.commit.to_string(),
            });
        }

        if resolved.is_dirty {
            warnings.push(BoundaryWarning::DirtyWorkingTree);
        }

        warnings
    }

    // Arbitrary non-version tags (deploy markers etc.) are normal and stay quiet
    fn from_skipped(skipped: &SkippedTag) -> Option<BoundaryWarning> {
        let tag = skipped.name.clone();
        match skipped.reason {
            SkipReason::Lightweight if looks_like_version(&skipped.name) => {
                Some(BoundaryWarning::LightweightTag { tag })
            }
            SkipReason::NotACommit => Some(BoundaryWarning::NonCommitTag { tag }),
            SkipReason::Unparseable if looks_like_version(&skipped.name) => {
                Some(BoundaryWarning::UnparsableTag { tag })
            }
            SkipReason::Lightweight | SkipReason::Unparseable => None,
        }
    }
}

fn looks_like_version(name: &str) -> bool {
    name.trim_start_matches(['v', 'V'])
        .starts_with(|c: char| c.is_ascii_digit())
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoVersionTag {
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No version tag reachable from {}, counting from 0.0.0",
                    short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Cannot parse tag '{}' as a semantic version", tag)
            }
            BoundaryWarning::LightweightTag { tag } => {
                write!(
                    f,
                    "Ignoring lightweight tag '{}', release tags must be annotated",
                    tag
                )
            }
            BoundaryWarning::NonCommitTag { tag } => {
                write!(f, "Ignoring tag '{}' which does not point at a commit", tag)
            }
            BoundaryWarning::DirtyWorkingTree => {
                write!(f, "Working tree has uncommitted changes")
            }
        }
    }
}
