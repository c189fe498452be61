/// CLI Module
///
/// Command-line interface configuration using clap.
use clap::Parser;

/// FC Online Match Data Fetcher - ETL Pipeline
///
/// Extract, transform, and load FC Online match history into PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "match-data-fetcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Player identifier (overrides FCO_OUID env var)
    #[arg(short = 'o', long, value_name = "OUID")]
    pub ouid: Option<String>,

    /// Database connection URL (overrides DATABASE_URL env var)
    #[arg(short = 'd', long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Nexon open API base URL (overrides NEXON_API_BASE_URL env var)
    #[arg(short = 'a', long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "30")]
    pub http_timeout: u64,
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ouid) = &self.ouid {
            if ouid.trim().is_empty() {
                anyhow::bail!("Player identifier must not be empty");
            }
        }

        if self.http_timeout == 0 {
            anyhow::bail!("HTTP timeout must be greater than 0");
        }

        Ok(())
    }
}
