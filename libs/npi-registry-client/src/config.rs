//! Client configuration
//!
//! Configuration can be built in code or loaded from `NPI_*` environment
//! variables (a `.env` file is honored). Validation happens before any
//! network activity, so an unknown log level never reaches the registry.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Public NPI registry endpoint.
pub const DEFAULT_BASE_URL: &str = "https://npiregistry.cms.hhs.gov/api";

/// Per-request timeout used unless configured otherwise.
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("npi-registry-client/", env!("CARGO_PKG_VERSION"));

/// Logging profile of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogProfile {
    /// Verbose, human-readable output on stderr.
    Development,
    /// Leveled JSON output on stderr.
    Production,
}

impl FromStr for LogProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "devel" | "dev" => Ok(LogProfile::Development),
            "production" | "prod" => Ok(LogProfile::Production),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown log level '{}', expected 'development' or 'production'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogProfile::Development => f.write_str("development"),
            LogProfile::Production => f.write_str("production"),
        }
    }
}

/// Registry client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// "development" or "production".
    pub log_level: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Sent as the `version` query parameter when set.
    pub api_version: Option<String>,
    /// `EnvFilter` directive overriding the profile's default filter.
    pub log_filter: Option<String>,
    /// Write log lines to this file instead of the console.
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: LogProfile::Production.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_version: None,
            log_filter: None,
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given log level.
    pub fn new(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `NPI_*` environment variables.
    ///
    /// Unset variables keep their defaults, e.g. `NPI_LOG_LEVEL=development`
    /// or `NPI_TIMEOUT_MS=5000`. Values stay strings until deserialization, so
    /// `NPI_API_VERSION=2.10` is kept as written.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: ClientConfig = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix("NPI"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the configuration and resolve the logging profile.
    pub fn validate(&self) -> Result<LogProfile> {
        let profile = self.log_level.parse::<LogProfile>()?;

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidConfiguration(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfiguration(format!(
                "base URL '{}' must use http or https",
                self.base_url
            )));
        }
        if url.query().is_some() {
            return Err(Error::InvalidConfiguration(format!(
                "base URL '{}' must not carry a query string",
                self.base_url
            )));
        }

        if self.timeout_ms == 0 {
            return Err(Error::InvalidConfiguration(
                "timeout must be greater than zero".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "user agent must not be empty".into(),
            ));
        }

        Ok(profile)
    }
}
