/// Pipeline Module
///
/// Orchestrates the complete ETL pipeline: Extract → Transform → Load
/// with run locking and statistics tracking.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::api::NexonApiClient;
use crate::db::Database;
use crate::etl::{extract, load, transform};

/// Pipeline execution statistics
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub records_extracted: usize,
    pub rows_loaded: u64,
    pub elapsed_time: Duration,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_per_second(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.rows_loaded as f64 / secs
        }
    }
}

/// Configuration for a pipeline run, resolved once by the caller
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub ouid: String,
}

/// Main ETL Pipeline
pub struct Pipeline {
    api_client: NexonApiClient,
    database: Database,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline instance
    pub fn new(api_client: NexonApiClient, database: Database, config: PipelineConfig) -> Self {
        Self { api_client, database, config }
    }

    /// Run the pipeline once: extract, transform, load
    ///
    /// The advisory run lock is held for the whole invocation so two runs
    /// can never interleave their replace transactions. Stage failures
    /// propagate to the caller; nothing is retried here.
    pub async fn run(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        tracing::info!("Starting match ETL run for player {}", self.config.ouid);

        let lock = self.database.try_acquire_run_lock().await.context("Failed to check the run lock")?;
        let Some(lock) = lock else {
            anyhow::bail!("Another run already holds the match table lock; refusing to overlap");
        };

        let outcome = self.run_stages().await;

        if let Err(e) = lock.release().await {
            tracing::warn!("Failed to release the run lock cleanly: {}", e);
        }

        let mut stats = outcome?;
        stats.elapsed_time = start_time.elapsed();

        tracing::info!(
            "Match ETL run complete: {} extracted, {} loaded in {:.2}s",
            stats.records_extracted,
            stats.rows_loaded,
            stats.elapsed_time.as_secs_f64()
        );

        Ok(stats)
    }

    /// Execute the three stages in order
    async fn run_stages(&self) -> Result<PipelineStats> {
        let mut stats = PipelineStats::new();

        let payload = extract::extract_match_history(&self.api_client, &self.config.ouid)
            .await
            .context("Extract stage failed")?;

        let rows = transform::transform(&payload).context("Transform stage failed")?;
        stats.records_extracted = rows.len();

        stats.rows_loaded = load::replace_match_table(self.database.pool(), &rows)
            .await
            .context("Load stage failed")?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_second() {
        let stats =
            PipelineStats { records_extracted: 100, rows_loaded: 100, elapsed_time: Duration::from_secs(4) };

        assert_eq!(stats.rows_per_second(), 25.0);
    }

    #[test]
    fn test_rows_per_second_handles_zero_elapsed() {
        let stats = PipelineStats::new();

        assert_eq!(stats.rows_per_second(), 0.0);
    }
}
