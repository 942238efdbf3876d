//! Error types for the controller tools

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

use crate::core::types::{BumpType, Version};

/// Result type for remote session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for SSID configuration runs
pub type ConfigureResult<T> = Result<T, ConfigureError>;

/// Result type for version bump runs
pub type BumpResult<T> = Result<T, BumpError>;

/// Errors related to the interactive remote session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    #[error("Authentication rejected by {0}")]
    AuthFailure(String),

    #[error("Timed out after {after:?} waiting for {pattern}")]
    PromptTimeout { pattern: String, after: Duration },

    #[error("Session closed by remote host")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to an SSID configuration run
#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Invalid prompt pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors related to scanning and bumping versions
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("File I/O failed for {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No file under {root} matches {pattern}")]
    PatternNotFound { root: PathBuf, pattern: String },

    #[error("Invalid version pattern: {0}")]
    InvalidPattern(String),

    #[error("Version segment {segment:?} in {path} is not a number in range")]
    InvalidVersion { path: PathBuf, segment: String },

    #[error("Cannot bump {bump} of {version} in {path}: segment would overflow")]
    VersionOverflow {
        path: PathBuf,
        version: Version,
        bump: BumpType,
    },

    #[error("Version control failed: {0}")]
    Vcs(String),
}

impl BumpError {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BumpError::FileIo {
            path: path.into(),
            source,
        }
    }
}

impl ConfigureError {
    /// Whether this error represents a user-initiated cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConfigureError::Cancelled)
    }
}
