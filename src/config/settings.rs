//! Runtime settings

use std::{path::PathBuf, time::Duration};

use crate::{
    config::{BumpArgs, SsidArgs},
    core::{
        error::{BumpError, ConfigureError},
        types::{BumpType, SsidParams},
    },
};

/// Runtime configuration for the SSID tool
#[derive(Debug, Clone)]
pub struct SsidSettings {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssid: Option<String>,
    pub vlan: Option<i64>,
    pub wlan_profile: Option<String>,
    pub hidden: bool,
    pub interactive: bool,
    pub timeout: Duration,
    pub prompt: regex::bytes::Regex,
    pub logfile: Option<PathBuf>,
    pub verbose: bool,
}

impl SsidSettings {
    /// Parameters built from flags alone, if every required flag was given
    pub fn complete_params(&self) -> Option<SsidParams> {
        Some(SsidParams {
            host: self.host.clone()?,
            username: self.username.clone()?,
            password: self.password.clone()?,
            ssid: self.ssid.clone()?,
            vlan: self.vlan?,
            wlan_profile: self.wlan_profile.clone()?,
            hidden: self.hidden,
        })
    }
}

impl TryFrom<SsidArgs> for SsidSettings {
    type Error = ConfigureError;

    fn try_from(args: SsidArgs) -> Result<Self, Self::Error> {
        Ok(SsidSettings {
            prompt: regex::bytes::Regex::new(&args.prompt)?,
            timeout: Duration::from_secs(args.timeout),
            host: args.host,
            port: args.port,
            username: args.username,
            password: args.password,
            ssid: args.ssid,
            vlan: args.vlan,
            wlan_profile: args.wlan_profile,
            hidden: args.hidden,
            interactive: args.interactive,
            logfile: args.logfile,
            verbose: args.verbose,
        })
    }
}

/// Runtime configuration for the version bumper
#[derive(Debug, Clone)]
pub struct BumpSettings {
    pub root: PathBuf,
    pub bump: BumpType,
    pub pattern: regex::Regex,
    pub commit: bool,
    pub tag: bool,
    pub message: String,
    pub dry_run: bool,
    pub exclude: Vec<String>,
    pub json: bool,
    pub logfile: Option<PathBuf>,
    pub verbose: bool,
}

impl TryFrom<BumpArgs> for BumpSettings {
    type Error = BumpError;

    fn try_from(args: BumpArgs) -> Result<Self, Self::Error> {
        let pattern = regex::Regex::new(&args.pattern)
            .map_err(|e| BumpError::InvalidPattern(e.to_string()))?;

        // Group 0 is the whole match
        if pattern.captures_len() < 4 {
            return Err(BumpError::InvalidPattern(format!(
                "{} needs three capture groups (major, minor, patch)",
                args.pattern
            )));
        }

        let exclude = args
            .exclude
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(BumpSettings {
            root: args.root,
            bump: args.bump,
            pattern,
            commit: args.commit,
            tag: args.tag,
            message: args.message,
            dry_run: args.dry_run,
            exclude,
            json: args.json,
            logfile: args.logfile,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn bump_settings(args: &[&str]) -> Result<BumpSettings, BumpError> {
        let argv = std::iter::once("version-bump").chain(args.iter().copied());
        BumpSettings::try_from(BumpArgs::parse_from(argv))
    }

    #[test]
    fn test_bump_defaults() {
        let settings = bump_settings(&[]).unwrap();

        assert_eq!(settings.root, PathBuf::from("."));
        assert_eq!(settings.bump, BumpType::Patch);
        assert_eq!(settings.message, "Bump version to {version}");
        assert!(settings.exclude.iter().any(|name| name == ".git"));
        assert!(!settings.dry_run);
        assert!(settings.pattern.is_match(r#"version = "1.2.3""#));
        assert!(settings.pattern.is_match("version='0.0.1'"));
    }

    #[test]
    fn test_exclude_list_is_split_and_trimmed() {
        let settings = bump_settings(&["--exclude", "build, dist,,vendor "]).unwrap();
        assert_eq!(settings.exclude, ["build", "dist", "vendor"]);
    }

    #[test]
    fn test_pattern_needs_three_groups() {
        let err = bump_settings(&["--pattern", r"v(\d+)\.(\d+)"]).unwrap_err();
        assert!(matches!(err, BumpError::InvalidPattern(_)));
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let err = bump_settings(&["--pattern", r"v(\d+"]).unwrap_err();
        assert!(matches!(err, BumpError::InvalidPattern(_)));
    }

    #[test]
    fn test_ssid_settings_from_flags() {
        let args = SsidArgs::parse_from([
            "ssid-config",
            "--host",
            "10.0.0.1",
            "--vlan",
            "-1",
            "--timeout",
            "5",
            "--hidden",
        ]);
        let settings = SsidSettings::try_from(args).unwrap();

        assert_eq!(settings.port, 23);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.vlan, Some(-1));
        assert!(settings.hidden);
        assert!(settings.prompt.is_match(b"ctrl(config)# "));
        assert!(settings.complete_params().is_none());
    }

    #[test]
    fn test_invalid_prompt_pattern() {
        let args = SsidArgs::parse_from(["ssid-config", "--prompt", "[#"]);
        assert!(matches!(
            SsidSettings::try_from(args),
            Err(ConfigureError::InvalidPattern(_))
        ));
    }
}
