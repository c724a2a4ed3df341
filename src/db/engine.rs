//! Database engine and connection management

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use super::error::StoreResult;

/// Connection pool shared by the request handlers.
///
/// Cloning is cheap; every clone refers to the same pool.
#[derive(Clone)]
pub struct DbEngine {
    pool: SqlitePool,
}

impl DbEngine {
    /// Open (creating if needed) the database file and make sure the schema exists
    pub async fn open(db_path: &Path, max_connections: u32, busy_timeout: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(busy_timeout)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        let engine = Self { pool };
        engine.create_tables().await?;
        Ok(engine)
    }

    /// A private in-memory database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // every connection to :memory: is its own database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let engine = Self { pool };
        engine.create_tables().await?;
        Ok(engine)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Borrow a connection for reads
    pub async fn acquire(&self) -> StoreResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Start a unit of work. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    async fn create_tables(&self) -> Result<()> {
        let pool = self.pool();

        // Venue table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS venues (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                address TEXT NOT NULL,
                phone TEXT NOT NULL,
                image_link TEXT,
                facebook_link TEXT,
                genres TEXT NOT NULL DEFAULT '[]',
                seeking_talent INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT,
                website TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_venues_location ON venues(state, city);
            "#,
        )
        .execute(pool)
        .await?;

        // Artist table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS artists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                phone TEXT NOT NULL,
                genres TEXT NOT NULL DEFAULT '[]',
                image_link TEXT,
                facebook_link TEXT,
                seeking_venue INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT,
                website TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Show table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shows (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                start_time TEXT NOT NULL,
                artist_id INTEGER NOT NULL,
                venue_id INTEGER NOT NULL,
                FOREIGN KEY (artist_id) REFERENCES artists(id) ON DELETE CASCADE,
                FOREIGN KEY (venue_id) REFERENCES venues(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_shows_artist_id ON shows(artist_id);
            CREATE INDEX IF NOT EXISTS idx_shows_venue_id ON shows(venue_id);
            CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time);
            "#,
        )
        .execute(pool)
        .await?;

        // Migration table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dbmigration (
                id INTEGER PRIMARY KEY,
                version INTEGER NOT NULL DEFAULT 0
            );
            INSERT OR IGNORE INTO dbmigration (id, version) VALUES (1, 0);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
