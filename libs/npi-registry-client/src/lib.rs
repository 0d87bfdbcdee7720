//! NPI Registry Client
//!
//! This crate provides a small async-first client for the public NPI registry
//! lookup API: fetch a provider record by NPI number, or search records by
//! name. A blocking client with the same surface lives in [`blocking`].
//!
//! # Examples
//!
//! ## Fetch by number
//!
//! ```rust,no_run
//! use npi_registry_client::{LogProfile, RegistryClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RegistryClient::with_profile(LogProfile::Production)?;
//! let record = client.get(1215290382).await?;
//! if let Some(address) = record.location_address() {
//!     println!("{} practices in {}", record.basic.display_name(), address.city);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Search by name
//!
//! ```rust,no_run
//! use npi_registry_client::{ClientConfig, RegistryClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RegistryClient::new(ClientConfig::new("development"))?;
//! for record in client.search_by_name("jane", "doe").await? {
//!     println!("{} {}", record.number, record.basic.display_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
pub mod async_client;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
mod query;
pub mod validation;

// Re-export main async types (default)
pub use async_client::RegistryClient;
pub use crate::config::{
    ClientConfig, LogProfile, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
pub use error::{Error, Result};
pub use models::{
    get_address, Address, BasicInfo, EnumerationType, Identifier, LookupResult, LOCATION_PURPOSE,
    MAILING_PURPOSE,
};
pub use validation::{check_digit, is_valid_npi, is_valid_npi_number};
