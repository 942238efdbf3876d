//! Remote session trait definition

use std::time::Duration;

use regex::bytes::Regex;
use trait_variant::make;

use crate::core::error::SessionResult;

/// Abstraction over a line-oriented interactive terminal session
///
/// Implementations drive a remote command prompt: send a line, then block
/// until one of the expected markers shows up in the output.
#[make(Send)]
pub trait RemoteSession: 'static {
    /// Send one line, terminated the way the remote expects
    async fn send_line(&mut self, line: &str) -> SessionResult<()>;

    /// Wait for the first of `patterns` to appear in the session output
    ///
    /// Returns the index of the pattern that matched. Output up to the end
    /// of the match is consumed.
    async fn expect(&mut self, patterns: &[&Regex], timeout: Duration) -> SessionResult<usize>;
}
