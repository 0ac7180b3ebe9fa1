//! Archive filename parsing: `"<artist> - <album>.zip"`

use std::path::Path;
use thiserror::Error;

use super::types::ArchiveIdentity;

pub const SEPARATOR: &str = " - ";
const EXTENSION: &str = ".zip";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse artist and album from {filename:?}")]
pub struct FilenameParsingError {
    pub filename: String,
}

impl FilenameParsingError {
    fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Split a filename into artist and album.
///
/// The artist is everything before the first `" - "`; the album is the
/// remainder with a trailing `.zip` (any ASCII case) removed. Both parts keep
/// their case and content as-is.
pub fn parse(filename: &str) -> Result<ArchiveIdentity, FilenameParsingError> {
    let (artist, raw_album) = filename
        .split_once(SEPARATOR)
        .ok_or_else(|| FilenameParsingError::new(filename))?;

    let album = strip_extension(raw_album);
    tracing::debug!(artist, album, "Parsed archive filename");

    Ok(ArchiveIdentity {
        artist: artist.to_string(),
        album: album.to_string(),
    })
}

/// Parse the final component of `path`
pub fn parse_path(path: &Path) -> Result<ArchiveIdentity, FilenameParsingError> {
    let filename = path
        .file_name()
        .ok_or_else(|| FilenameParsingError::new(path.display().to_string()))?;

    match filename.to_str() {
        Some(name) => parse(name),
        None => Err(FilenameParsingError::new(filename.to_string_lossy())),
    }
}

fn strip_extension(name: &str) -> &str {
    let split_at = name.len().saturating_sub(EXTENSION.len());
    match (name.get(..split_at), name.get(split_at..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(EXTENSION) => stem,
        _ => name,
    }
}
