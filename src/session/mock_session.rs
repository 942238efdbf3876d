//! Mock remote session for testing

use std::{collections::VecDeque, time::Duration};

use regex::bytes::Regex;

use crate::core::error::{SessionError, SessionResult};
use crate::session::RemoteSession;

/// Scripted answer to one `expect` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReply {
    /// Report that the pattern at this index matched
    Match(usize),
    /// Report a prompt timeout
    Timeout,
    /// Report that the remote hung up
    Closed,
}

/// Mock session that records sent lines and replays scripted prompt matches
///
/// Once the script is exhausted every `expect` matches its first pattern.
#[derive(Debug, Default)]
pub struct MockRemoteSession {
    sent: Vec<String>,
    script: VecDeque<MockReply>,
    expects: usize,
}

impl MockRemoteSession {
    /// Create a mock that matches every first pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers `expect` calls with `replies`, in order
    pub fn with_script(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            script: replies.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Lines sent so far
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Number of `expect` calls made so far
    pub fn expects(&self) -> usize {
        self.expects
    }
}

impl RemoteSession for MockRemoteSession {
    async fn send_line(&mut self, line: &str) -> SessionResult<()> {
        self.sent.push(line.to_string());
        Ok(())
    }

    async fn expect(&mut self, patterns: &[&Regex], timeout: Duration) -> SessionResult<usize> {
        self.expects += 1;
        match self.script.pop_front().unwrap_or(MockReply::Match(0)) {
            MockReply::Match(index) => Ok(index),
            MockReply::Timeout => Err(SessionError::PromptTimeout {
                pattern: patterns
                    .first()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default(),
                after: timeout,
            }),
            MockReply::Closed => Err(SessionError::SessionClosed),
        }
    }
}
