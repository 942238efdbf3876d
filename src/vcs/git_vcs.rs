//! git backend implementation

use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use crate::{
    core::error::{BumpError, BumpResult},
    vcs::VersionControl,
};

/// Runs `git` in the project working directory
#[derive(Debug, Clone)]
pub struct GitVcs {
    program: String,
    workdir: PathBuf,
}

impl GitVcs {
    /// Create a git backend operating in `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", workdir)
    }

    /// Create a backend that runs `program` instead of `git`
    pub fn with_program(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> BumpResult<String> {
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .await
            .map_err(|e| BumpError::Vcs(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpError::Vcs(format!(
                "{} {} exited with {}: {}",
                self.program,
                args.first().copied().unwrap_or_default(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitVcs {
    async fn add(&self, paths: &[PathBuf]) -> BumpResult<()> {
        let paths: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();

        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> BumpResult<()> {
        self.run(&["commit", "-m", message]).await?;
        Ok(())
    }

    async fn tag(&self, name: &str, message: &str) -> BumpResult<()> {
        self.run(&["tag", "-a", name, "-m", message]).await?;
        Ok(())
    }
}
