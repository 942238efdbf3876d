//! Logging context
//!
//! Each binary builds one [`LogContext`] and attaches it to its run future.
//! No process-global subscriber is installed.

use std::{
    fs::{File, OpenOptions},
    future::Future,
    io,
    path::Path,
    sync::Mutex,
};

use tracing::{Dispatch, instrument::WithDispatch, instrument::WithSubscriber};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Console plus optional file logging, scoped to the futures it is attached to
#[derive(Clone)]
pub struct LogContext {
    dispatch: Dispatch,
}

impl LogContext {
    /// Build the context for a binary
    ///
    /// `RUST_LOG` takes precedence over the `verbose` default.
    pub fn new(crate_name: &str, verbose: bool, logfile: Option<&Path>) -> io::Result<Self> {
        let level = if verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "warn,controller_tools={},{}={}",
                level, crate_name, level
            ))
        });

        Self::with_filter(filter, logfile)
    }

    fn with_filter(filter: EnvFilter, logfile: Option<&Path>) -> io::Result<Self> {
        let file_layer = match logfile {
            Some(path) => {
                let file: File = OpenOptions::new().create(true).append(true).open(path)?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .with(file_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Run `future` with this context as its default subscriber
    pub fn attach<F: Future>(&self, future: F) -> WithDispatch<F> {
        future.with_subscriber(self.dispatch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tracing::{debug, info};

    #[tokio::test]
    async fn test_events_reach_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");

        let logging = LogContext::with_filter(EnvFilter::new("info"), Some(path.as_path())).unwrap();
        logging
            .attach(async {
                info!("configured ssid Guest");
                debug!("not recorded at info");
            })
            .await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("configured ssid Guest"));
        assert!(!contents.contains("not recorded at info"));
        assert!(!contents.contains('\x1b'));
    }

    #[tokio::test]
    async fn test_log_file_is_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let logging = LogContext::with_filter(EnvFilter::new("debug"), Some(path.as_path())).unwrap();
        logging.attach(async { debug!("second run") }).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.contains("second run"));
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("run.log");

        assert!(LogContext::with_filter(EnvFilter::new("info"), Some(path.as_path())).is_err());
    }
}
