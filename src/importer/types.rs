use serde::Serialize;
use std::path::PathBuf;

use super::filename::FilenameParsingError;

/// Artist/album pair derived from an archive filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveIdentity {
    pub artist: String,
    pub album: String,
}

/// Terminal state of a single archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Archive contents were published to `target`
    Imported { target: PathBuf },
    /// `target` already existed; nothing was written
    SkippedDuplicate {
        target: PathBuf,
    },
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnparseableFilename(FilenameParsingError),
    /// Identity would resolve outside `media_root/<artist>/<album>`
    UnsafeIdentity(ArchiveIdentity),
}

/// Why an archive did not make it into the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NotAnArchive,
    UnparseableFilename,
    UnsafeIdentity,
    Duplicate,
    ExtractionFailed {
        message: String,
    },
}

impl From<&RejectReason> for SkipReason {
    fn from(reason: &RejectReason) -> Self {
        match reason {
            RejectReason::UnparseableFilename(_) => SkipReason::UnparseableFilename,
            RejectReason::UnsafeIdentity(_) => SkipReason::UnsafeIdentity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedArchive {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of one batch. Both lists keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: Vec<PathBuf>,
    pub skipped: Vec<SkippedArchive>,
}

impl ImportReport {
    pub(crate) fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedArchive { path, reason });
    }
}
