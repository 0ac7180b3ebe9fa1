use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::archive::{self, Publish};
use super::error::Result;
use super::filename;
use super::types::{ArchiveIdentity, ImportOutcome, ImportReport, RejectReason, SkipReason};

const ARCHIVE_SUFFIX: &str = ".zip";

/// What a batch does when extracting one archive fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error and leave the rest of the batch unprocessed
    #[default]
    Abort,
    /// Log the error, record the archive as skipped, keep going
    Continue,
}

#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub media_root: PathBuf,
    pub on_error: FailurePolicy,
}

impl ImportSettings {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// Moves album archives into `media_root/<artist>/<album>`.
///
/// The existence of the target directory is the only record of a past
/// import: an archive whose target exists is never extracted again.
#[derive(Debug, Clone)]
pub struct ImportEngine {
    settings: ImportSettings,
}

impl ImportEngine {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    /// Target directory for an identity, or `None` when either field is not
    /// a single plain path component.
    pub fn target_for(&self, identity: &ArchiveIdentity) -> Option<PathBuf> {
        if !is_plain_component(&identity.artist) || !is_plain_component(&identity.album) {
            return None;
        }
        Some(
            self.settings
                .media_root
                .join(&identity.artist)
                .join(&identity.album),
        )
    }

    /// Import a single archive.
    ///
    /// Does not check the container up front: an unreadable or corrupt
    /// archive surfaces as an `Err` from extraction.
    pub fn import_one(&self, path: &Path) -> Result<ImportOutcome> {
        let identity = match filename::parse_path(path) {
            Ok(identity) => identity,
            Err(err) => {
                error!(path = %path.display(), error = %err, "Could not process zip filename");
                return Ok(ImportOutcome::Rejected(
                    RejectReason::UnparseableFilename(err),
                ));
            }
        };

        let Some(target) = self.target_for(&identity) else {
            error!(
                path = %path.display(),
                artist = %identity.artist,
                album = %identity.album,
                "Archive name does not map to a directory inside the media root"
            );
            return Ok(ImportOutcome::Rejected(
                RejectReason::UnsafeIdentity(identity),
            ));
        };

        // symlink_metadata so a dangling link still counts as an existing entry
        if target.symlink_metadata().is_ok() {
            info!(dest = %target.display(), "Skipping existing album in the media root");
            return Ok(ImportOutcome::SkippedDuplicate { target });
        }

        debug!(path = %path.display(), dest = %target.display(), "Extracting archive");
        match archive::extract_to(path, &target)? {
            Publish::Published => {
                info!(path = %path.display(), dest = %target.display(), "Imported album");
                Ok(ImportOutcome::Imported { target })
            }
            Publish::TargetExists => {
                info!(
                    dest = %target.display(),
                    "Album appeared in the media root during extraction; skipping"
                );
                Ok(ImportOutcome::SkippedDuplicate { target })
            }
        }
    }

    /// Import each path in order, skipping non-archives, unparseable names
    /// and albums that are already present.
    pub fn import_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        debug!(count = paths.len(), "Importing archives");

        for path in paths {
            let path = path.as_ref();
            debug!(path = %path.display(), "Importing");

            if !archive::is_zip_archive(path) {
                warn!(path = %path.display(), "Does not appear to be a .zip file; skipping");
                report.skip(path.to_path_buf(), SkipReason::NotAnArchive);
                continue;
            }

            match self.import_one(path) {
                Ok(ImportOutcome::Imported { .. }) => report.imported.push(path.to_path_buf()),
                Ok(ImportOutcome::SkippedDuplicate { .. }) => {
                    report.skip(path.to_path_buf(), SkipReason::Duplicate)
                }
                Ok(ImportOutcome::Rejected(reason)) => {
                    report.skip(path.to_path_buf(), SkipReason::from(&reason))
                }
                Err(err) => match self.settings.on_error {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Continue => {
                        error!(path = %path.display(), error = %err, "Extraction failed; continuing");
                        report.skip(
                            path.to_path_buf(),
                            SkipReason::ExtractionFailed {
                                message: err.to_string(),
                            },
                        );
                    }
                },
            }
        }

        Ok(report)
    }

    /// Import every `*.zip` entry directly inside `source_dir`, in file name
    /// order. A missing directory yields an empty report.
    pub fn import_directory(&self, source_dir: &Path) -> Result<ImportReport> {
        let archives = find_archives(source_dir);
        debug!(
            source = %source_dir.display(),
            count = archives.len(),
            "Found zip files to import"
        );
        self.import_files(archives.as_slice())
    }
}

/// Non-recursive `*.zip` listing of `dir`, sorted by file name
pub fn find_archives(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!(source = %dir.display(), "Source directory does not exist; nothing to import");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(ARCHIVE_SUFFIX))
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
