/// FC Online Match Data Fetcher
///
/// An ETL pipeline that mirrors a player's latest match history from the
/// Nexon open API into PostgreSQL.
mod api;
mod cli;
mod db;
mod error;
mod etl;
mod models;
mod pipeline;

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use api::NexonApiClient;
use cli::Cli;
use db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    cli.validate()?;

    println!("🚀 Starting FC Online Match Fetcher...");

    // Resolve configuration once, up front; the pipeline never reads the
    // environment itself.
    let api_key =
        env::var("NEXON_API_KEY").context("NEXON_API_KEY not found in environment. Please check your .env file")?;

    let ouid = match cli.ouid {
        Some(ref ouid) => ouid.clone(),
        None => env::var("FCO_OUID").context("FCO_OUID not found in environment. Please check your .env file")?,
    };

    let database_url = match cli.database_url {
        Some(ref url) => url.clone(),
        None => {
            env::var("DATABASE_URL").context("DATABASE_URL not found in environment. Please check your .env file")?
        }
    };

    let api_base_url = cli
        .api_base_url
        .clone()
        .or_else(|| env::var("NEXON_API_BASE_URL").ok())
        .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());

    // Initialize the API client
    let api_client = NexonApiClient::new(api_key, api_base_url, Duration::from_secs(cli.http_timeout))
        .context("Failed to create Nexon API client")?;

    println!("✅ API endpoint: {}", api_client.base_url());
    println!("🎯 Player: {}", ouid);

    // Initialize database connection
    println!("\n💾 Connecting to PostgreSQL database...");
    let database = Database::new(&database_url).await.context("Failed to connect to PostgreSQL database")?;

    database.test_connection().await.context("Database connection test failed")?;

    println!("✅ Database connected successfully!");

    // Run database migrations
    println!("📋 Running database migrations...");
    database.migrate().await.context("Failed to run database migrations")?;

    println!("✅ Database schema ready!");

    tracing::info!("FC Online Match Fetcher initialized successfully");

    // One run per invocation; the external scheduler owns the cadence.
    let pipeline = pipeline::Pipeline::new(api_client, database, pipeline::PipelineConfig { ouid });

    let stats = pipeline.run().await.context("Pipeline execution failed")?;

    println!("\n✅ Run complete!");
    println!("   📝 Records extracted: {}", stats.records_extracted);
    println!("   💾 Rows loaded: {}", stats.rows_loaded);
    println!("   ⏱️  Total time: {:.2}s ({:.0} rows/sec)", stats.elapsed_time.as_secs_f64(), stats.rows_per_second());

    Ok(())
}
