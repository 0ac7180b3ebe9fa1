//! Tracing subscriber setup
//!
//! The subscriber is installed before configuration is read, at a bootstrap
//! level, so that config loading can log. Once the configured level is known
//! it is swapped in through [`TracingHandle::set_level`].

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::{LevelFilter, LevelParseError, ParseError};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, reload};

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),

    #[error("Failed to update log level: {0}")]
    Reload(#[from] reload::Error),
}

/// Controls the level of an installed subscriber
#[derive(Debug, Clone)]
pub struct TracingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    // RUST_LOG was set; it keeps precedence over configured levels
    pinned: bool,
}

impl TracingHandle {
    /// Replace the active level. No-op when `RUST_LOG` chose the filter.
    pub fn set_level(&self, level: &str) -> Result<(), TracingInitError> {
        if self.pinned {
            return Ok(());
        }
        self.filter.reload(level_filter(level)?)?;
        Ok(())
    }
}

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`)
pub fn parse_level(level: &str) -> Result<LevelFilter, LevelParseError> {
    level.trim().parse()
}

/// Install a stderr fmt subscriber at `level`.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to every target until
/// the returned handle changes it.
pub fn init_tracing(level: &str) -> Result<TracingHandle, TracingInitError> {
    let (filter, pinned) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (level_filter(level)?, false),
    };

    let (subscriber, handle) = subscriber(filter, pinned, std::io::stderr);
    subscriber
        .try_init()
        .map_err(|e| TracingInitError::Install(e.to_string()))?;
    Ok(handle)
}

fn level_filter(level: &str) -> Result<EnvFilter, TracingInitError> {
    EnvFilter::try_new(level.trim()).map_err(|source| TracingInitError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}

fn subscriber<W>(
    filter: EnvFilter,
    pinned: bool,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, TracingHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false));
    let handle = TracingHandle {
        filter: handle,
        pinned,
    };
    (subscriber, handle)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// In-memory writer for asserting on formatted events
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Subscriber writing to `captured`, plus its level handle
    pub(crate) fn capturing(
        level: &str,
        captured: &Captured,
    ) -> (impl Subscriber + Send + Sync + 'static, TracingHandle) {
        subscriber(level_filter(level).unwrap(), false, captured.clone())
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::WARN);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_set_level_replaces_bootstrap_level() {
        let captured = Captured::default();
        let (subscriber, handle) = capturing("info", &captured);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("emitted at bootstrap");
            handle.set_level("warn").unwrap();
            tracing::info!("dropped after reload");
            tracing::warn!("emitted after reload");
        });

        let output = captured.contents();
        assert!(output.contains("emitted at bootstrap"));
        assert!(!output.contains("dropped after reload"));
        assert!(output.contains("emitted after reload"));
    }

    #[test]
    fn test_pinned_filter_ignores_set_level() {
        let captured = Captured::default();
        let (subscriber, handle) = subscriber(EnvFilter::new("info"), true, captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            handle.set_level("error").unwrap();
            tracing::info!("still emitted");
        });

        assert!(captured.contents().contains("still emitted"));
    }

    #[test]
    fn test_set_level_rejects_unknown_level() {
        let captured = Captured::default();
        let (_subscriber, handle) = capturing("info", &captured);

        assert!(matches!(
            handle.set_level("importer=loud"),
            Err(TracingInitError::InvalidLevel { .. })
        ));
    }
}
