//! Album archive import engine
//!
//! Moves Bandcamp-style album downloads (`"<artist> - <album>.zip"`) into a
//! media library laid out as `<media_root>/<artist>/<album>/`.
//!
//! ## Key Components
//!
//! - [`filename::parse`] - derives an [`ArchiveIdentity`] from a filename
//! - [`ImportEngine`] - validates, resolves and extracts archives
//! - [`ImportReport`] - per-batch record of imported and skipped archives
//!
//! ## Example
//!
//! ```rust,no_run
//! use bandcamp_importer::importer::{ImportEngine, ImportSettings};
//! use std::path::Path;
//!
//! let engine = ImportEngine::new(ImportSettings::new("/srv/music"));
//! let report = engine.import_directory(Path::new("/home/me/Downloads"))?;
//! println!("imported {} albums", report.imported.len());
//! # Ok::<(), bandcamp_importer::importer::ImportError>(())
//! ```

pub mod archive;
mod engine;
mod error;
pub mod filename;
mod types;

pub use engine::{FailurePolicy, ImportEngine, ImportSettings, find_archives};
pub use error::{ImportError, Result};
pub use filename::FilenameParsingError;
pub use types::{
    ArchiveIdentity, ImportOutcome, ImportReport, RejectReason, SkipReason, SkippedArchive,
};
