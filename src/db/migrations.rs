//! Database migrations

use anyhow::Result;
use tracing::info;

use super::DbEngine;
use crate::models::genres;

/// Current migration version
const CURRENT_VERSION: i32 = 2;

/// Run database migrations
pub async fn run_migrations(engine: &DbEngine) -> Result<()> {
    let current_version = get_migration_version(engine).await?;

    if current_version >= CURRENT_VERSION {
        info!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Running migrations from version {} to {}",
        current_version, CURRENT_VERSION
    );

    for version in (current_version + 1)..=CURRENT_VERSION {
        let mut tx = engine.begin().await?;
        run_migration(&mut *tx, version).await?;

        sqlx::query("UPDATE dbmigration SET version = ? WHERE id = 1")
            .bind(version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Applied migration {}", version);
    }

    Ok(())
}

async fn run_migration(conn: &mut sqlx::SqliteConnection, version: i32) -> Result<()> {
    match version {
        1 => {
            // Initial schema is created when the engine opens
        }
        2 => {
            // genres used to be stored comma-joined; rewrite them as JSON arrays
            for table in ["venues", "artists"] {
                let rows: Vec<(i64, String)> =
                    sqlx::query_as(&format!("SELECT id, genres FROM {}", table))
                        .fetch_all(&mut *conn)
                        .await?;

                let mut converted = 0;
                for (id, raw) in rows {
                    if !genres::is_legacy(&raw) {
                        continue;
                    }
                    let encoded = genres::to_column(&genres::split_legacy(&raw));
                    sqlx::query(&format!("UPDATE {} SET genres = ? WHERE id = ?", table))
                        .bind(encoded)
                        .bind(id)
                        .execute(&mut *conn)
                        .await?;
                    converted += 1;
                }

                if converted > 0 {
                    info!("Converted genres of {} {} rows", converted, table);
                }
            }
        }
        _ => {
            tracing::warn!("Unknown migration version: {}", version);
        }
    }

    Ok(())
}

/// Get the current migration version
pub async fn get_migration_version(engine: &DbEngine) -> Result<i32> {
    let row: (i32,) = sqlx::query_as("SELECT version FROM dbmigration WHERE id = 1")
        .fetch_one(engine.pool())
        .await?;

    Ok(row.0)
}
