use crate::domain::version::SemanticVersion;
use git2::Oid;
use std::cmp::Ordering;

/// An annotated tag whose name parses as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    pub name: String,
    /// Commit the tag ultimately points at
    pub target: Oid,
    pub version: SemanticVersion,
}

impl TagCandidate {
    /// Build a candidate from a tag name, or `None` when the name is not a version.
    pub fn parse(name: impl Into<String>, target: Oid) -> Option<Self> {
        TagCandidate::parse_with_prefix(name, target, "")
    }

    /// Like [`TagCandidate::parse`], also accepting names that start with `prefix`.
    ///
    /// Exactly one prefix is removed: `prefix` when the name carries it, otherwise a
    /// single optional `v` or `V`.
    pub fn parse_with_prefix(name: impl Into<String>, target: Oid, prefix: &str) -> Option<Self> {
        let name = name.into();
        let bare = match name.strip_prefix(prefix).filter(|_| !prefix.is_empty()) {
            Some(rest) => rest,
            None => name.strip_prefix(['v', 'V']).unwrap_or(&name),
        };
        let version = SemanticVersion::parse_bare(bare).ok()?;

        Some(TagCandidate {
            name,
            target,
            version,
        })
    }

    /// Ranking between tags on the same commit: higher precedence first, then the
    /// greater name so that equal-precedence duplicates still pick one deterministically.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.version
            .cmp_precedence(&other.version)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Naming pattern for release tags written by this tool (e.g. prefix "v" -> "v1.2.3")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub prefix: String,
}

impl TagPattern {
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPattern {
            prefix: prefix.into(),
        }
    }

    /// Format a version as a tag name
    pub fn format(&self, version: &SemanticVersion) -> String {
        format!("{}{}", self.prefix, version)
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v")
    }
}
