//! # Store Handle
//!
//! Owns the SQLite pool. WAL mode plus a busy timeout makes concurrent
//! writers queue at the storage layer instead of failing immediately,
//! which the CAS retry loop in the engine relies on.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use sv_types::StoreResult;

use crate::schema;

/// Handle to the SocialVerse relational store.
///
/// Cheap to clone; all repositories are methods on this type, split
/// across the per-entity modules of this crate.
#[derive(Debug, Clone)]
pub struct SocialStore {
    pool: SqlitePool,
}

impl SocialStore {
    /// Open (creating if missing) a file-backed store and run migrations.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .map_err(sv_types::StoreError::from)?;

        schema::migrate(&pool).await?;
        tracing::info!(path = %path.as_ref().display(), "store opened");
        Ok(Self { pool })
    }

    /// Open an in-memory store for tests.
    ///
    /// Capped at one connection: every SQLite connection gets its own
    /// private in-memory database, so a larger pool would see empty
    /// tables. Concurrency tests use a temp file instead.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(sv_types::StoreError::from)?;

        schema::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// The underlying pool. Exposed for the engine, repositories, and
    /// test harnesses; application code goes through the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
