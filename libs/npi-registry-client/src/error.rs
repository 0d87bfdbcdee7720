//! Error types for npi-registry-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Registry client errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The registry did not return exactly one record for the number.
    #[error("NPI record not found: {number}")]
    NotFound { number: u64 },
}

impl Error {
    /// Whether this is the "no such record" outcome of a lookup by number.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Whether the request failed because the client timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::InvalidConfiguration(err.to_string())
    }
}
