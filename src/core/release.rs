//! Commit and tag a bumped version

use std::path::PathBuf;

use tracing::info;

use crate::{
    config::BumpSettings,
    core::{
        error::BumpResult,
        types::{BumpReport, Version},
    },
    vcs::VersionControl,
};

/// Placeholder replaced by the new version in message templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Fill the message template with `version`
pub fn render_message(template: &str, version: &Version) -> String {
    template.replace(VERSION_PLACEHOLDER, &version.to_string())
}

/// Tag name for `version`
pub fn tag_name(version: &Version) -> String {
    format!("v{}", version)
}

/// Record the bump with version control, as requested by `--commit`/`--tag`
///
/// Nothing happens in dry-run mode. Paths are passed relative to the scan
/// root, which is the working directory of the version control tool.
pub async fn commit_and_tag<V: VersionControl>(
    vcs: &V,
    settings: &BumpSettings,
    report: &BumpReport,
) -> BumpResult<()> {
    if !settings.commit && !settings.tag {
        return Ok(());
    }

    let Some(version) = report.last_version else {
        return Ok(());
    };

    if report.dry_run {
        info!("Dry run, skipping commit and tag for {}", version);
        return Ok(());
    }

    let message = render_message(&settings.message, &version);

    if settings.commit {
        let paths: Vec<PathBuf> = report
            .files
            .iter()
            .map(|path| {
                path.strip_prefix(&settings.root)
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| path.clone())
            })
            .collect();

        vcs.add(&paths).await?;
        vcs.commit(&message).await?;
        info!("Committed {} file(s): {}", paths.len(), message);
    }

    if settings.tag {
        let tag = tag_name(&version);
        vcs.tag(&tag, &message).await?;
        info!("Tagged {}", tag);
    }

    Ok(())
}
