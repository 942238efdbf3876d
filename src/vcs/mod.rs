//! Version control abstraction layer

pub mod git_vcs;
pub mod mock_vcs;
pub mod version_control;

pub use git_vcs::GitVcs;
pub use version_control::VersionControl;

#[cfg(test)]
pub use mock_vcs::MockVcs;
