//! Interactive remote session layer

pub mod mock_session;
pub mod prompt_session;
pub mod remote_session;
pub mod telnet;

pub use prompt_session::PromptSession;
pub use remote_session::RemoteSession;

#[cfg(test)]
pub use mock_session::MockRemoteSession;
