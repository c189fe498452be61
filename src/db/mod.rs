/// Database Module
///
/// This module handles all PostgreSQL database operations including:
/// - Connection pool management
/// - Schema migrations
/// - The advisory run lock guarding against overlapping runs
use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres};

/// Advisory lock key for the match ETL run ("FcoMatch" as bytes). Two runs
/// racing the replace transaction would leave a non-deterministic snapshot,
/// so every run must hold this lock for its full duration.
const RUN_LOCK_KEY: i64 = 0x4663_6f4d_6174_6368;

pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL database")?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await.context("Failed to run database migrations")?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.context("Database connection test failed")?;

        Ok(())
    }

    /// Try to take the advisory run lock
    ///
    /// Returns `None` when another session already holds it. Advisory locks
    /// are session-scoped, so the returned guard pins its pool connection
    /// until released via [`RunLock::release`].
    pub async fn try_acquire_run_lock(&self) -> Result<Option<RunLock>> {
        let mut conn =
            self.pool.acquire().await.context("Failed to acquire a connection for the run lock")?;

        let locked = sqlx::query_scalar::<_, bool>("SELECT pg_try_advisory_lock($1)")
            .bind(RUN_LOCK_KEY)
            .fetch_one(&mut *conn)
            .await
            .context("Failed to take the advisory run lock")?;

        if locked {
            Ok(Some(RunLock { conn }))
        } else {
            Ok(None)
        }
    }
}

/// Guard holding the advisory run lock.
///
/// Must be released explicitly: a dropped guard returns its connection to
/// the pool with the session-level lock still held.
pub struct RunLock {
    conn: PoolConnection<Postgres>,
}

impl RunLock {
    /// Release the lock and return the connection to the pool
    pub async fn release(mut self) -> Result<()> {
        sqlx::query("SELECT pg_advisory_unlock($1)")
            .bind(RUN_LOCK_KEY)
            .execute(&mut *self.conn)
            .await
            .context("Failed to release the advisory run lock")?;

        Ok(())
    }
}
