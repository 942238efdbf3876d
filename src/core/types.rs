//! Domain types for SSID provisioning and version bumping

use std::{fmt, path::PathBuf};

use serde::Serialize;

/// Parameters for one SSID provisioning run
#[derive(Clone, PartialEq, Eq)]
pub struct SsidParams {
    /// Controller host name or address
    pub host: String,
    /// Login user
    pub username: String,
    /// Login password
    pub password: String,
    /// Broadcast network name
    pub ssid: String,
    /// VLAN the SSID is bound to
    pub vlan: i64,
    /// WLAN profile bound to the SSID
    pub wlan_profile: String,
    /// Suppress SSID broadcast
    pub hidden: bool,
}

impl fmt::Debug for SsidParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SsidParams")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("ssid", &self.ssid)
            .field("vlan", &self.vlan)
            .field("wlan_profile", &self.wlan_profile)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Version segment to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BumpType {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpType::Major => "major",
            BumpType::Minor => "minor",
            BumpType::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Three-part semantic version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Return the version that follows `self` for the given segment
    ///
    /// Lower segments reset to zero. `None` if the segment would overflow.
    pub fn bump(self, bump: BumpType) -> Option<Self> {
        let next = match bump {
            BumpType::Major => Self::new(self.major.checked_add(1)?, 0, 0),
            BumpType::Minor => Self::new(self.major, self.minor.checked_add(1)?, 0),
            BumpType::Patch => Self::new(self.major, self.minor, self.patch.checked_add(1)?),
        };
        Some(next)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a version bump run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpReport {
    /// Files whose version string matched, in visiting order
    pub files: Vec<PathBuf>,
    /// Version computed for the last matching file
    pub last_version: Option<Version>,
    /// Whether files were left untouched
    pub dry_run: bool,
}

/// Identifier attached to the log span of a remote session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
