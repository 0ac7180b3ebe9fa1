use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::importer::{FailurePolicy, ImportSettings};

/// Log level used until a configuration has been read
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl Config {
    /// Engine settings derived from this configuration
    pub fn import_settings(&self) -> ImportSettings {
        ImportSettings {
            media_root: self.library.media_root.clone(),
            on_error: self.import.on_error,
        }
    }
}

/// Where albums come from and where they go
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,
    #[serde(default = "default_downloads")]
    pub downloads: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            media_root: default_media_root(),
            downloads: default_downloads(),
        }
    }
}

fn default_media_root() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

fn default_downloads() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub on_error: FailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.import.on_error, FailurePolicy::Abort);
        assert!(!config.library.media_root.as_os_str().is_empty());
        assert_ne!(config.library.media_root, config.library.downloads);
    }

    #[test]
    fn test_import_settings() {
        let mut config = Config::default();
        config.library.media_root = PathBuf::from("/srv/music");
        config.import.on_error = FailurePolicy::Continue;

        let settings = config.import_settings();
        assert_eq!(settings.media_root, PathBuf::from("/srv/music"));
        assert_eq!(settings.on_error, FailurePolicy::Continue);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
[library]
media_root = "/srv/music"

[import]
on_error = "continue"
            "#,
        )
        .unwrap();

        assert_eq!(config.library.media_root, PathBuf::from("/srv/music"));
        assert_eq!(config.library.downloads, default_downloads());
        assert_eq!(config.import.on_error, FailurePolicy::Continue);
        assert_eq!(config.logging.level, "info");
    }
}
