//! Version control trait definition

use std::path::PathBuf;

use trait_variant::make;

use crate::core::error::BumpResult;

/// Abstraction over the version control tool that records a release
#[make(Send)]
pub trait VersionControl: Sync + 'static {
    /// Stage files, given relative to the repository working directory
    async fn add(&self, paths: &[PathBuf]) -> BumpResult<()>;

    /// Commit staged changes
    async fn commit(&self, message: &str) -> BumpResult<()>;

    /// Create an annotated tag on the current commit
    async fn tag(&self, name: &str, message: &str) -> BumpResult<()>;
}
