use super::models::Config;
use config::{ConfigError, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "BANDCAMP_IMPORTER_CONFIG";
const CONFIG_FILE_NAME: &str = "bandcamp-importer.toml";
const ENV_PREFIX: &str = "BANDCAMP_IMPORTER";
const ENV_SEPARATOR: &str = "__";

/// Configuration file used when none is given explicitly:
/// `$BANDCAMP_IMPORTER_CONFIG`, else `<config dir>/bandcamp-importer.toml`
pub fn default_config_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_FILE_NAME)
        })
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(config_path: Option<PathBuf>) -> Result<Config, ConfigError> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    load_from_sources(config_path.unwrap_or_else(default_config_path))
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let config_path = expand_home(&config_path);
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(
            File::from(config_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // BANDCAMP_IMPORTER__LIBRARY__MEDIA_ROOT -> library.media_root
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let mut config: Config = builder.build()?.try_deserialize()?;
    config.library.media_root = expand_home(&config.library.media_root);
    config.library.downloads = expand_home(&config.library.downloads);
    Ok(config)
}

/// Replace a leading `~` with the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
