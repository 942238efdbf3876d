//! Version scanner and bumper

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::{
    config::BumpSettings,
    core::{
        error::{BumpError, BumpResult},
        types::{BumpReport, BumpType, Version},
    },
};

/// Result of bumping the version found in one file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub old: Version,
    pub new: Version,
    pub text: String,
}

/// Finds and rewrites version strings below a project root
///
/// Files are handled one after the other. A failure leaves files that were
/// already rewritten as they are.
#[derive(Debug, Clone)]
pub struct VersionBumper {
    root: PathBuf,
    pattern: Regex,
    exclude: Vec<String>,
    bump: BumpType,
    dry_run: bool,
}

impl VersionBumper {
    pub fn new(settings: &BumpSettings) -> Self {
        Self {
            root: settings.root.clone(),
            pattern: settings.pattern.clone(),
            exclude: settings.exclude.clone(),
            bump: settings.bump,
            dry_run: settings.dry_run,
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    /// List the regular files below the root, skipping excluded directories
    ///
    /// Symlinks are never followed. Entries are visited in name order.
    pub async fn candidate_files(&self) -> BumpResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = Vec::new();
            let mut reader = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| BumpError::file_io(&dir, e))?;

            while let Some(entry) = reader
                .next_entry()
                .await
                .map_err(|e| BumpError::file_io(&dir, e))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| BumpError::file_io(entry.path(), e))?;
                entries.push((entry.file_name(), entry.path(), file_type));
            }
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut subdirs = Vec::new();
            for (name, path, file_type) in entries {
                if file_type.is_dir() {
                    if self.is_excluded(&name.to_string_lossy()) {
                        debug!("Skipping excluded directory {}", path.display());
                    } else {
                        subdirs.push(path);
                    }
                } else if file_type.is_file() {
                    files.push(path);
                }
            }

            // Reversed so the first subdirectory is popped first
            pending.extend(subdirs.into_iter().rev());
        }

        Ok(files)
    }

    /// Bump the first version found in `text`, read from `path`
    ///
    /// Only the span from the first to the third capture group is replaced.
    /// A match whose segments are not `u64` numbers, or whose bumped segment
    /// would overflow, is an error rather than a miss.
    pub fn rewrite(&self, path: &Path, text: &str) -> BumpResult<Option<Rewrite>> {
        let Some(captures) = self.pattern.captures(text) else {
            return Ok(None);
        };
        let (Some(major), Some(minor), Some(patch)) =
            (captures.get(1), captures.get(2), captures.get(3))
        else {
            return Ok(None);
        };
        if patch.end() < major.start() {
            return Ok(None);
        }

        let old = Version::new(
            parse_segment(path, major.as_str())?,
            parse_segment(path, minor.as_str())?,
            parse_segment(path, patch.as_str())?,
        );
        let new = old.bump(self.bump).ok_or_else(|| BumpError::VersionOverflow {
            path: path.to_path_buf(),
            version: old,
            bump: self.bump,
        })?;

        let mut rewritten = String::with_capacity(text.len() + 2);
        rewritten.push_str(&text[..major.start()]);
        rewritten.push_str(&new.to_string());
        rewritten.push_str(&text[patch.end()..]);

        Ok(Some(Rewrite {
            old,
            new,
            text: rewritten,
        }))
    }

    async fn process(&self, path: &Path) -> BumpResult<Option<Version>> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BumpError::file_io(path, e))?;
        let Ok(text) = String::from_utf8(bytes) else {
            debug!("Skipping non-UTF-8 file {}", path.display());
            return Ok(None);
        };

        let Some(rewrite) = self.rewrite(path, &text)? else {
            return Ok(None);
        };

        if self.dry_run {
            info!(
                "Would bump {} from {} to {}",
                path.display(),
                rewrite.old,
                rewrite.new
            );
        } else {
            tokio::fs::write(path, rewrite.text.as_bytes())
                .await
                .map_err(|e| BumpError::file_io(path, e))?;
            info!(
                "Bumped {} from {} to {}",
                path.display(),
                rewrite.old,
                rewrite.new
            );
        }

        Ok(Some(rewrite.new))
    }

    /// Scan the root and bump every matching file
    ///
    /// The reported version is the one computed for the last matching file.
    pub async fn run(&self) -> BumpResult<BumpReport> {
        let mut report = BumpReport {
            files: Vec::new(),
            last_version: None,
            dry_run: self.dry_run,
        };

        for path in self.candidate_files().await? {
            if let Some(version) = self.process(&path).await? {
                report.files.push(path);
                report.last_version = Some(version);
            }
        }

        if report.files.is_empty() {
            return Err(BumpError::PatternNotFound {
                root: self.root.clone(),
                pattern: self.pattern.as_str().to_string(),
            });
        }

        Ok(report)
    }
}

fn parse_segment(path: &Path, segment: &str) -> BumpResult<u64> {
    segment.parse().map_err(|_| BumpError::InvalidVersion {
        path: path.to_path_buf(),
        segment: segment.to_string(),
    })
}
