//! Blocking NPI registry client
//!
//! Same behavior as [`crate::RegistryClient`], but every call blocks the
//! current thread until the response is decoded or the timeout elapses.
//! Must not be created or used from within an async runtime.

use crate::config::{ClientConfig, LogProfile};
use crate::error::{Error, Result};
use crate::logging::ClientLogger;
use crate::models::{LookupResult, ResultEnvelope};
use crate::query::Query;
use reqwest::blocking::Client;

/// Blocking client for the NPI registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
    api_version: Option<String>,
    logger: ClientLogger,
}

impl RegistryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let profile = config.validate()?;
        let logger = ClientLogger::init(profile, &config)?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_version: config.api_version,
            logger,
        })
    }

    pub fn with_profile(profile: LogProfile) -> Result<Self> {
        Self::new(ClientConfig::new(profile.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the record for an NPI number.
    ///
    /// Zero results and several results both yield [`Error::NotFound`].
    pub fn get(&self, number: u64) -> Result<LookupResult> {
        self.logger.in_scope(|| {
            let _span = tracing::debug_span!("npi.get", number).entered();
            let envelope = self.execute(&Query::Number(number))?;
            envelope.into_single().ok_or_else(|| {
                tracing::debug!("Lookup did not yield exactly one record");
                Error::NotFound { number }
            })
        })
    }

    /// Search records by first and last name. An empty result is not an error.
    pub fn search_by_name(&self, first_name: &str, last_name: &str) -> Result<Vec<LookupResult>> {
        self.logger.in_scope(|| {
            let _span = tracing::debug_span!("npi.search", first_name, last_name).entered();
            let query = Query::Name {
                first_name,
                last_name,
            };
            Ok(self.execute(&query)?.results)
        })
    }

    fn execute(&self, query: &Query<'_>) -> Result<ResultEnvelope> {
        let url = query.url(&self.base_url, self.api_version.as_deref());
        tracing::debug!(url = %url, "Sending registry request");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Registry responded with non-success status");
        }

        let body = response.bytes()?;
        let envelope = ResultEnvelope::from_slice(&body)?;
        envelope.report();
        Ok(envelope)
    }
}
