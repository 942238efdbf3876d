//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::core::{configurator::DEFAULT_PROMPT, types::BumpType};

/// Default version pattern: `version = "X.Y.Z"` with either quote style
pub const DEFAULT_VERSION_PATTERN: &str = r#"version\s*=\s*["'](\d+)\.(\d+)\.(\d+)["']"#;

/// Directories never entered while scanning
pub const DEFAULT_EXCLUDES: &str = ".git,target,node_modules,venv,.venv,__pycache__";

#[derive(Parser, Debug, Clone)]
#[clap(name = "ssid-config", version, author)]
#[clap(about = "Push an SSID configuration to a wireless controller")]
pub struct SsidArgs {
    /// Controller host name or address
    #[clap(long)]
    pub host: Option<String>,

    /// Controller terminal port
    #[clap(long, default_value = "23")]
    pub port: u16,

    /// Login user
    #[clap(short, long)]
    pub username: Option<String>,

    /// Login password
    #[clap(short, long)]
    pub password: Option<String>,

    /// SSID to create or update
    #[clap(long)]
    pub ssid: Option<String>,

    /// VLAN the SSID is bound to
    #[clap(long, allow_negative_numbers = true)]
    pub vlan: Option<i64>,

    /// WLAN profile bound to the SSID
    #[clap(long)]
    pub wlan_profile: Option<String>,

    /// Hide the SSID from broadcast
    #[clap(long)]
    pub hidden: bool,

    /// Prompt for every parameter
    #[clap(short, long)]
    pub interactive: bool,

    /// Also write the log to this file
    #[clap(long)]
    pub logfile: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Seconds to wait for each prompt
    #[clap(long, default_value = "30")]
    pub timeout: u64,

    /// Regular expression matching the controller command prompt
    #[clap(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "version-bump", version, author)]
#[clap(about = "Bump the version string found in project files")]
pub struct BumpArgs {
    /// Project root to scan
    #[clap(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Version segment to increment
    #[clap(short, long, value_enum, default_value = "patch")]
    pub bump: BumpType,

    /// Regular expression with three capture groups: major, minor, patch
    #[clap(long, default_value = DEFAULT_VERSION_PATTERN)]
    pub pattern: String,

    /// Commit the rewritten files
    #[clap(long)]
    pub commit: bool,

    /// Tag the new version
    #[clap(long)]
    pub tag: bool,

    /// Commit and tag message, `{version}` is replaced by the new version
    #[clap(short, long, default_value = "Bump version to {version}")]
    pub message: String,

    /// Report what would change without writing
    #[clap(short = 'n', long)]
    pub dry_run: bool,

    /// Comma-separated directory names to skip
    #[clap(long, default_value = DEFAULT_EXCLUDES)]
    pub exclude: String,

    /// Print the report as JSON on stdout
    #[clap(long)]
    pub json: bool,

    /// Also write the log to this file
    #[clap(long)]
    pub logfile: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,
}
