//! Domain logic - pure value types independent of git access

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{short_id, CommitRef, ParsedCommit};
pub use tag::{TagCandidate, TagPattern};
pub use version::{SemanticVersion, VersionBump};
