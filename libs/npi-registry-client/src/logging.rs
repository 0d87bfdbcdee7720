//! Logging initialization for registry clients
//!
//! Each client owns its own `tracing` dispatcher instead of installing a
//! process-wide subscriber, so several clients with different profiles can
//! live in one process and constructing a client never fights the host
//! application over the global default.
//!
//! Profiles:
//! - development: human-readable lines on stderr, `debug` by default
//! - production: JSON lines on stderr, `info` by default
//!
//! Console output never goes to stdout, which belongs to the host program.
//!
//! `RUST_LOG` overrides the profile default, an explicit `log_filter` overrides
//! both. With `log_file` set, output goes to that file instead of the console.

use std::fs;
use std::path::Path;

use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::{ClientConfig, LogProfile};
use crate::error::{Error, Result};

/// Logging handle held by a client.
#[derive(Debug, Clone)]
pub struct ClientLogger {
    dispatch: Dispatch,
    profile: LogProfile,
}

impl ClientLogger {
    /// Build the subscriber for the given profile.
    pub fn init(profile: LogProfile, config: &ClientConfig) -> Result<Self> {
        let env_filter = build_env_filter(profile, config)?;
        let writer = build_writer(config)?;
        let ansi = config.log_file.is_none();

        let dispatch = match profile {
            LogProfile::Development => {
                let layer = fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(ansi)
                    .with_writer(writer);
                Dispatch::new(tracing_subscriber::registry().with(env_filter).with(layer))
            }
            LogProfile::Production => {
                let layer = fmt::layer()
                    .json()
                    .with_current_span(true) // Include span fields
                    .with_span_list(false)
                    .with_writer(writer);
                Dispatch::new(tracing_subscriber::registry().with(env_filter).with(layer))
            }
        };

        let logger = Self { dispatch, profile };
        logger.in_scope(|| {
            tracing::debug!(profile = %profile, "Client logging initialized");
        });
        Ok(logger)
    }

    pub fn profile(&self) -> LogProfile {
        self.profile
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the current dispatcher.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn default_level(profile: LogProfile) -> &'static str {
    match profile {
        LogProfile::Development => "debug",
        LogProfile::Production => "info",
    }
}

/// Build environment filter
fn build_env_filter(profile: LogProfile, config: &ClientConfig) -> Result<EnvFilter> {
    if let Some(directive) = &config.log_filter {
        return EnvFilter::try_new(directive).map_err(|e| {
            Error::LoggingInit(format!("invalid log filter '{}': {}", directive, e))
        });
    }

    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("npi_registry_client={}", default_level(profile)))
    }))
}

fn build_writer(config: &ClientConfig) -> Result<BoxMakeWriter> {
    match &config.log_file {
        Some(path) => Ok(BoxMakeWriter::new(create_file_appender(path)?)),
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}

/// Create a non-rotating file appender at `path`, creating its directory.
fn create_file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            Error::LoggingInit(format!("log file '{}' has no file name", path.display()))
        })?
        .to_string_lossy()
        .into_owned();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(directory).map_err(|e| {
        Error::LoggingInit(format!(
            "cannot create log directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| Error::LoggingInit(format!("cannot open log file '{}': {}", path.display(), e)))
}
