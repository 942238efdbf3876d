//! Prompt-driven session over a byte stream

use std::time::Duration;

use regex::bytes::Regex;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    time::Instant,
};
use tracing::{debug, trace};

use crate::{
    core::{
        error::{SessionError, SessionResult},
        types::SessionId,
    },
    session::{RemoteSession, telnet::TelnetFilter},
};

const READ_CHUNK: usize = 4096;

/// Interactive text session that waits for prompt markers
///
/// Works over any byte stream; the TCP constructor is what the SSID tool
/// uses against a controller's terminal port.
#[derive(Debug)]
pub struct PromptSession<S> {
    id: SessionId,
    stream: S,
    filter: TelnetFilter,
    buffer: Vec<u8>,
}

impl PromptSession<TcpStream> {
    /// Open a TCP terminal session to `host:port`
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> SessionResult<Self> {
        debug!("Connecting to {}:{}", host, port);

        let stream = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(SessionError::ConnectionFailure(format!(
                    "{}:{}: {}",
                    host, port, e
                )));
            }
            Err(_) => {
                return Err(SessionError::ConnectionFailure(format!(
                    "{}:{}: no answer within {:?}",
                    host, port, timeout
                )));
            }
        };

        Ok(Self::new(stream))
    }
}

impl<S> PromptSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Wrap an already connected stream
    pub fn new(stream: S) -> Self {
        Self {
            id: SessionId::new(),
            stream,
            filter: TelnetFilter::new(),
            buffer: Vec::new(),
        }
    }

    /// Get session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Test the buffered output against `patterns`, consuming up to the first hit
    fn take_match(&mut self, patterns: &[&Regex]) -> Option<usize> {
        for (index, pattern) in patterns.iter().enumerate() {
            if let Some(found) = pattern.find(&self.buffer) {
                let end = found.end();
                self.buffer.drain(..end);
                return Some(index);
            }
        }
        None
    }

    /// Read one chunk from the remote into the buffer
    async fn fill(&mut self) -> SessionResult<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(SessionError::SessionClosed);
        }

        let filtered = self.filter.feed(&chunk[..n]);
        if !filtered.reply.is_empty() {
            self.stream.write_all(&filtered.reply).await?;
            self.stream.flush().await?;
        }

        trace!(
            "Received: {:?}",
            String::from_utf8_lossy(&filtered.data).as_ref()
        );
        self.buffer.extend_from_slice(&filtered.data);
        Ok(())
    }
}

impl<S> RemoteSession for PromptSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    async fn send_line(&mut self, line: &str) -> SessionResult<()> {
        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn expect(&mut self, patterns: &[&Regex], timeout: Duration) -> SessionResult<usize> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(index) = self.take_match(patterns) {
                return Ok(index);
            }

            if tokio::time::timeout_at(deadline, self.fill()).await.is_err() {
                let pattern = patterns
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ");
                return Err(SessionError::PromptTimeout {
                    pattern,
                    after: timeout,
                });
            }
        }
    }
}
