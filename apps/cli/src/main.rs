use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use npi_registry_client::{is_valid_npi, ClientConfig, Error, RegistryClient};

#[derive(Parser)]
#[command(name = "npi")]
#[command(version, about = "Look up providers in the NPI registry", long_about = None)]
struct Cli {
    /// Logging profile: development or production (default: NPI_LOG_LEVEL or production)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Registry endpoint (default: NPI_BASE_URL or the public registry)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a record by NPI number
    Get {
        number: u64,

        /// Print only the address with this purpose (e.g. LOCATION, MAILING)
        #[arg(long)]
        purpose: Option<String>,
    },

    /// Search records by first and last name (fuzzy, no wildcards needed)
    Search { first_name: String, last_name: String },

    /// Check an NPI number's format and check digit without contacting the registry
    Validate { number: String },
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("Failed to read NPI_* configuration")?;
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Validate { number } => {
            if is_valid_npi(number) {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Get { number, purpose } => {
            let client = RegistryClient::new(cli.client_config()?)?;
            let record = match client.get(*number).await {
                Ok(record) => record,
                Err(Error::NotFound { number }) => {
                    eprintln!("No NPI record found for {}", number);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e).context("Registry lookup failed"),
            };

            match purpose {
                Some(purpose) => match record.address(purpose) {
                    Some(address) => println!("{}", serde_json::to_string_pretty(address)?),
                    None => {
                        eprintln!("Record {} has no {} address", record.number, purpose);
                        return Ok(ExitCode::FAILURE);
                    }
                },
                None => println!("{}", serde_json::to_string_pretty(&record)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search {
            first_name,
            last_name,
        } => {
            let client = RegistryClient::new(cli.client_config()?)?;
            let results = client
                .search_by_name(first_name, last_name)
                .await
                .context("Registry search failed")?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
