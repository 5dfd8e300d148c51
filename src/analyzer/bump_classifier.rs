use crate::config::BumpConfig;
use crate::domain::{CommitRef, ParsedCommit, VersionBump};
use git2::Oid;

/// Bump required by a set of commits, with the commits that required it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpDecision {
    pub bump: VersionBump,
    /// Commits whose own signal equals `bump`, in walk order
    pub commits: Vec<Oid>,
}

impl BumpDecision {
    pub fn none() -> Self {
        BumpDecision {
            bump: VersionBump::None,
            commits: Vec::new(),
        }
    }
}

/// Classifies commits by their conventional-commit markers
pub struct BumpClassifier {
    config: BumpConfig,
}

impl BumpClassifier {
    /// Create a new bump classifier
    pub fn new(config: BumpConfig) -> Self {
        BumpClassifier { config }
    }

    /// Bump signalled by one commit message. Never `None`: an unmarked, empty, or
    /// unparseable message is still a change and counts as a patch.
    pub fn signal(&self, message: &str) -> VersionBump {
        let parsed = ParsedCommit::parse(message);

        if parsed.has_breaking_marker || parsed.has_footer(&self.config.breaking_footers) {
            return VersionBump::Major;
        }

        let is_feature = parsed.r#type.as_deref().is_some_and(|t| {
            self.config
                .feature_types
                .iter()
                .any(|feature| feature.eq_ignore_ascii_case(t))
        });

        if is_feature {
            VersionBump::Minor
        } else {
            VersionBump::Patch
        }
    }

    /// Strongest signal across `commits`; an empty sequence needs no bump.
    pub fn classify(&self, commits: &[CommitRef]) -> BumpDecision {
        let signals: Vec<(Oid, VersionBump)> = commits
            .iter()
            .map(|commit| (commit.id, self.signal(&commit.message)))
            .collect();

        let bump = signals
            .iter()
            .map(|(_, bump)| *bump)
            .max()
            .unwrap_or(VersionBump::None);

        BumpDecision {
            bump,
            commits: signals
                .into_iter()
                .filter(|(_, signal)| *signal == bump)
                .map(|(id, _)| id)
                .collect(),
        }
    }
}

impl Default for BumpClassifier {
    fn default() -> Self {
        BumpClassifier::new(BumpConfig::default())
    }
}
