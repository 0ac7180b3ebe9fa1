//! Zip container checks and staged extraction

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::error::{ImportError, Result};

const STAGING_PREFIX: &str = ".import-";

/// Open `path` as a zip archive, checking the container signature rather than
/// the file extension. Missing files, directories and non-zip content all
/// report `false`.
pub fn is_zip_archive(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    ZipArchive::new(BufReader::new(file)).is_ok()
}

/// How a staged extraction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    /// Contents were moved into place
    Published,
    /// Another writer created the target first; staged contents were dropped
    TargetExists,
}

/// Extract every entry of `archive` into `target`.
///
/// Entries are unpacked into a hidden staging directory next to `target`
/// which is renamed onto `target` once all entries are written, so `target`
/// never exists in a half-written state. Entry paths are kept relative to
/// `target`; entries that would escape it are refused by the zip reader.
pub fn extract_to(archive: &Path, target: &Path) -> Result<Publish> {
    let parent = target
        .parent()
        .ok_or_else(|| ImportError::io(target, std::io::ErrorKind::InvalidInput.into()))?;
    fs::create_dir_all(parent).map_err(|e| ImportError::io(parent, e))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| ImportError::io(parent, e))?;

    let file = File::open(archive).map_err(|e| ImportError::io(archive, e))?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(extraction_error(archive))?;

    tracing::debug!(
        archive = %archive.display(),
        staging = %staging.path().display(),
        entries = zip.len(),
        "Extracting archive"
    );
    zip.extract(staging.path())
        .map_err(extraction_error(archive))?;

    match fs::rename(staging.path(), target) {
        Ok(()) => Ok(Publish::Published),
        // Lost a race with another importer; `staging` is cleaned up on drop
        Err(_) if target.exists() => Ok(Publish::TargetExists),
        Err(e) => Err(ImportError::io(target, e)),
    }
}

fn extraction_error(archive: &Path) -> impl FnOnce(ZipError) -> ImportError + '_ {
    move |source| ImportError::Extraction {
        archive: archive.to_path_buf(),
        source,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    /// Write a stored (uncompressed) zip with the given entries
    pub(crate) fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_is_zip_archive() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.zip");
        let bad = dir.path().join("bad.zip");
        write_zip(&good, &[("one.mp3", "one")]);
        fs::write(&bad, "definitely not a zip container").unwrap();

        assert!(is_zip_archive(&good));
        assert!(!is_zip_archive(&bad));
        assert!(!is_zip_archive(&dir.path().join("missing.zip")));
        assert!(!is_zip_archive(dir.path()));
    }

    #[test]
    fn test_signature_not_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("album.bin");
        write_zip(&path, &[("one.mp3", "one")]);

        assert!(is_zip_archive(&path));
    }

    #[test]
    fn test_extract_preserves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("a.zip");
        write_zip(&archive, &[("one.mp3", "one"), ("disc 2/two.flac", "two")]);
        let target = dir.path().join("media").join("artist").join("album");

        let publish = extract_to(&archive, &target).unwrap();

        assert_eq!(publish, Publish::Published);
        assert_eq!(fs::read_to_string(target.join("one.mp3")).unwrap(), "one");
        assert_eq!(
            fs::read_to_string(target.join("disc 2/two.flac")).unwrap(),
            "two"
        );
    }

    #[test]
    fn test_extract_leaves_no_staging_directory() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("a.zip");
        write_zip(&archive, &[("one.mp3", "one")]);
        let artist_dir = dir.path().join("artist");

        extract_to(&archive, &artist_dir.join("album")).unwrap();

        let names: Vec<_> = fs::read_dir(&artist_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["album"]);
    }

    #[test]
    fn test_extract_reports_existing_target() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("a.zip");
        write_zip(&archive, &[("one.mp3", "new")]);
        let target = dir.path().join("artist").join("album");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "old").unwrap();

        let publish = extract_to(&archive, &target).unwrap();

        assert_eq!(publish, Publish::TargetExists);
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "old");
        assert!(!target.join("one.mp3").exists());
    }

    #[test]
    fn test_extract_invalid_container() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("a.zip");
        fs::write(&archive, "garbage").unwrap();
        let target = dir.path().join("artist").join("album");

        let err = extract_to(&archive, &target).unwrap_err();

        assert!(matches!(err, ImportError::Extraction { .. }));
        assert!(!target.exists());
    }
}
