//! Connection pool for the smarthome database.
//!
//! Concurrent requests share one pool. File databases run in WAL mode with a
//! busy timeout so that a reading insert does not fail while another request
//! holds the write lock.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 8;

/// Where the database lives.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:smarthome.db?mode=rwc` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Open the database, creating the file when missing, and bring the
    /// schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the URL is invalid, the connection fails
    /// or a migration cannot be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let migrator = sqlx::migrate!("./migrations");
        migrator.run(&pool).await?;
        tracing::info!(
            database_url = %self.database_url,
            migrations = migrator.iter().count(),
            "database ready"
        );

        Ok(Database { pool })
    }
}

/// An open database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_every_table_when_using_memory_db() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        for table in [
            "actuator_models",
            "actuator_types",
            "actuators",
            "device_types",
            "devices",
            "houses",
            "readings",
            "rooms",
            "sensor_models",
            "sensor_types",
            "sensors",
        ] {
            assert!(names.contains(&table), "missing {table} table");
        }
    }
}
