pub mod analyzer;
pub mod boundary;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod resolver;
pub mod ui;
pub mod walker;

pub use error::{Result, SemverError};
pub use resolver::{resolve, ResolvedVersion, VersionResolver};
