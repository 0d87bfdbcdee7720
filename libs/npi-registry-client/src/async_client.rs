//! NPI registry API client

use crate::config::{ClientConfig, LogProfile};
use crate::error::{Error, Result};
use crate::logging::ClientLogger;
use crate::models::{LookupResult, ResultEnvelope};
use crate::query::Query;
use reqwest::Client;
use tracing::instrument::WithSubscriber;

/// Client for the NPI registry.
///
/// Every call issues exactly one GET request bounded by the configured
/// timeout. Nothing is retried or cached, and the client holds no per-call
/// state, so one instance can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
    api_version: Option<String>,
    logger: ClientLogger,
}

impl RegistryClient {
    /// Create a client from configuration.
    ///
    /// The configuration is validated before anything else happens; an
    /// unknown log level yields [`Error::InvalidConfiguration`] and a logging
    /// setup failure yields [`Error::LoggingInit`].
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

    /// Create a client with default settings and the given log profile.
    pub fn with_profile(profile: LogProfile) -> Result<Self> {
        Self::new(ClientConfig::new(profile.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log_profile(&self) -> LogProfile {
        self.logger.profile()
    }

    /// Fetch the record for an NPI number.
    ///
    /// Returns [`Error::NotFound`] unless the registry reports exactly one
    /// result. Note that a response carrying several records is reported as
    /// not found as well, not as ambiguous.
    pub async fn get(&self, number: u64) -> Result<LookupResult> {
        self.get_record(number)
            .with_subscriber(self.logger.dispatch().clone())
            .await
    }

    /// Search records by first and last name.
    ///
    /// Matching is fuzzy on the registry side; pass plain names without
    /// wildcards. An empty result is not an error.
    pub async fn search_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<LookupResult>> {
        self.search_records(first_name, last_name)
            .with_subscriber(self.logger.dispatch().clone())
            .await
    }

    #[tracing::instrument(name = "npi.get", level = "debug", skip(self))]
    async fn get_record(&self, number: u64) -> Result<LookupResult> {
        let envelope = self.execute(&Query::Number(number)).await?;
        envelope.into_single().ok_or_else(|| {
            tracing::debug!("Lookup did not yield exactly one record");
            Error::NotFound { number }
        })
    }

    #[tracing::instrument(name = "npi.search", level = "debug", skip(self))]
    async fn search_records(&self, first_name: &str, last_name: &str) -> Result<Vec<LookupResult>> {
        let query = Query::Name {
            first_name,
            last_name,
        };
        let envelope = self.execute(&query).await?;
        Ok(envelope.results)
    }

    async fn execute(&self, query: &Query<'_>) -> Result<ResultEnvelope> {
        let url = query.url(&self.base_url, self.api_version.as_deref());
        tracing::debug!(url = %url, "Sending registry request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Registry responded with non-success status");
        }

        let body = response.bytes().await?;
        let envelope = ResultEnvelope::from_slice(&body)?;
        envelope.report();
        Ok(envelope)
    }
}
