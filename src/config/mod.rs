//! Configuration management for bandcamp-importer
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use bandcamp_importer::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load configuration");
//! println!("Importing into: {}", config.library.media_root.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `BANDCAMP_IMPORTER__<section>__<key>`
//!
//! Examples:
//! - `BANDCAMP_IMPORTER__LIBRARY__MEDIA_ROOT=/srv/music`
//! - `BANDCAMP_IMPORTER__LIBRARY__DOWNLOADS=~/Downloads`
//! - `BANDCAMP_IMPORTER__LOGGING__LEVEL=debug`
//! - `BANDCAMP_IMPORTER__IMPORT__ON_ERROR=continue`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from
//! `<config dir>/bandcamp-importer.toml` (`~/.config` on Linux).
//! This can be overridden using the `BANDCAMP_IMPORTER_CONFIG` environment
//! variable or an explicit path.

mod models;
mod sources;
mod validation;

pub use models::{Config, DEFAULT_LOG_LEVEL, ImportConfig, LibraryConfig, LoggingConfig};
pub use sources::{default_config_path, expand_home};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Values that take precedence over every configuration source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub media_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// `path` overrides the default configuration file location.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (empty media root, unknown log level, ...)
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, &Overrides::default())
    }

    /// Like [`Config::load`], with `overrides` applied before validation
    pub fn load_with_overrides(
        path: Option<PathBuf>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut config = sources::load(path)?;
        config.apply(overrides);
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path, skipping `.env`
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.trim().to_lowercase();
        }
        if let Some(media_root) = &overrides.media_root {
            self.library.media_root = expand_home(media_root);
        }
    }
}
