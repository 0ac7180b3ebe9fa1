use super::models::Config;
use crate::observability;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("library.media_root must not be empty")]
    EmptyMediaRoot,

    #[error("Unknown log level '{level}', expected one of error, warn, info, debug, trace, off")]
    InvalidLogLevel { level: String },

    #[error("library.downloads and library.media_root are the same directory: {path}")]
    DownloadsIsMediaRoot { path: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_library(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_library(config: &Config) -> Result<(), ValidationError> {
    let library = &config.library;

    if library.media_root.as_os_str().is_empty() {
        return Err(ValidationError::EmptyMediaRoot);
    }

    if library.downloads == library.media_root {
        return Err(ValidationError::DownloadsIsMediaRoot {
            path: library.media_root.display().to_string(),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> Result<(), ValidationError> {
    if observability::parse_level(&config.logging.level).is_err() {
        return Err(ValidationError::InvalidLogLevel {
            level: config.logging.level.clone(),
        });
    }

    Ok(())
}
