use crate::error::{Result, SemverError};
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with optional pre-release and build metadata.
///
/// Pre-release and build identifiers are stored as the dot-separated sequences
/// validated by the `semver` crate, so every value renders as a legal version.
/// Equality is structural (build metadata included); ordering of releases goes
/// through [`SemanticVersion::cmp_precedence`], which ignores build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl SemanticVersion {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Base version of a project that has never been released.
    pub fn initial() -> Self {
        SemanticVersion::new(0, 0, 0)
    }

    /// Parse a version, accepting a single leading `v` or `V` (e.g. "v1.2.3-rc.1+build.5").
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let clean = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);

        SemanticVersion::parse_bare(clean)
    }

    /// Parse strict `MAJOR.MINOR.PATCH[-PRE][+BUILD]` with no prefix.
    pub fn parse_bare(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text)
            .map_err(|e| SemverError::version(format!("Invalid version '{}': {}", text, e)))?;

        Ok(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre: parsed.pre,
            build: parsed.build,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Pre-release identifiers in order, empty for a release
    pub fn pre_release_identifiers(&self) -> Vec<&str> {
        split_identifiers(self.pre.as_str())
    }

    /// Build metadata identifiers in order
    pub fn build_identifiers(&self) -> Vec<&str> {
        split_identifiers(self.build.as_str())
    }

    /// The numeric triple alone, without pre-release or build metadata.
    pub fn release_part(&self) -> Self {
        SemanticVersion::new(self.major, self.minor, self.patch)
    }

    /// Apply a bump. Every bump except `None` yields a plain release triple.
    ///
    /// # Errors
    /// Fails with `Version` when the incremented component does not fit in a `u64`.
    pub fn bump(&self, bump: VersionBump) -> Result<Self> {
        let overflow = || SemverError::version(format!("Cannot apply {} bump to {}", bump, self));

        Ok(match bump {
            VersionBump::Major => {
                SemanticVersion::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionBump::Minor => SemanticVersion::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            VersionBump::Patch => SemanticVersion::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            VersionBump::None => self.clone(),
        })
    }

    /// Replace the pre-release identifiers.
    pub fn with_pre_release(&self, identifiers: &[String]) -> Result<Self> {
        let pre = Prerelease::new(&identifiers.join(".")).map_err(|e| {
            SemverError::version(format!(
                "Invalid pre-release identifiers {:?}: {}",
                identifiers, e
            ))
        })?;

        Ok(SemanticVersion {
            pre,
            ..self.clone()
        })
    }

    /// Append one identifier to the build metadata.
    pub fn with_build_identifier(&self, identifier: &str) -> Result<Self> {
        let joined = if self.build.is_empty() {
            identifier.to_string()
        } else {
            format!("{}.{}", self.build, identifier)
        };

        let build = BuildMetadata::new(&joined).map_err(|e| {
            SemverError::version(format!("Invalid build identifier '{}': {}", identifier, e))
        })?;

        Ok(SemanticVersion {
            build,
            ..self.clone()
        })
    }

    /// Semantic version precedence: numeric triple, then pre-release (a pre-release
    /// sorts below the bare triple). Build metadata never takes part.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

fn split_identifiers(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split('.').collect()
    }
}

impl Default for SemanticVersion {
    fn default() -> Self {
        SemanticVersion::initial()
    }
}

impl FromStr for SemanticVersion {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

/// Version bump decision, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionBump {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        };
        f.write_str(name)
    }
}
