//! Mock version control backend for testing

use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

use crate::core::error::{BumpError, BumpResult};
use crate::vcs::VersionControl;

/// A version control call recorded by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Add(Vec<PathBuf>),
    Commit(String),
    Tag { name: String, message: String },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<VcsCall>,
    should_fail_commit: bool,
}

/// Mock version control backend that records calls
#[derive(Debug, Clone, Default)]
pub struct MockVcs {
    inner: Arc<Mutex<MockState>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure mock to fail commit operations
    pub async fn set_commit_failure(&self, should_fail: bool) {
        self.inner.lock().await.should_fail_commit = should_fail;
    }

    /// Calls recorded so far
    pub async fn calls(&self) -> Vec<VcsCall> {
        self.inner.lock().await.calls.clone()
    }
}

impl VersionControl for MockVcs {
    async fn add(&self, paths: &[PathBuf]) -> BumpResult<()> {
        self.inner
            .lock()
            .await
            .calls
            .push(VcsCall::Add(paths.to_vec()));
        Ok(())
    }

    async fn commit(&self, message: &str) -> BumpResult<()> {
        let mut state = self.inner.lock().await;
        if state.should_fail_commit {
            return Err(BumpError::Vcs("Mock commit failure".into()));
        }
        state.calls.push(VcsCall::Commit(message.to_string()));
        Ok(())
    }

    async fn tag(&self, name: &str, message: &str) -> BumpResult<()> {
        self.inner.lock().await.calls.push(VcsCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_vcs_records_calls() {
        let vcs = MockVcs::new();

        vcs.add(&[PathBuf::from("Cargo.toml")]).await.unwrap();
        vcs.commit("msg").await.unwrap();

        assert_eq!(
            vcs.calls().await,
            vec![
                VcsCall::Add(vec![PathBuf::from("Cargo.toml")]),
                VcsCall::Commit("msg".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_vcs_commit_failure() {
        let vcs = MockVcs::new();
        vcs.set_commit_failure(true).await;

        assert!(vcs.commit("msg").await.is_err());
        assert!(vcs.calls().await.is_empty());
    }
}
