use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{DateKey, SnapshotRecord};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::{SnapshotStorage, StoredSnapshot};

/// DbConnection manages the SQLite snapshot table
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (and create if needed) the database at `url`
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("Failed to create database {}", url))?;
        }

        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// A private in-memory database, unique per call
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                date_key TEXT PRIMARY KEY,
                record TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SnapshotStorage for DbConnection {
    async fn save_snapshot(&self, date: &DateKey, record: &SnapshotRecord) -> Result<()> {
        let value = serde_json::to_string(record)?;
        let saved_at = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT OR REPLACE INTO snapshots (date_key, record, saved_at) VALUES (?, ?, ?)")
            .bind(date.as_str())
            .bind(value)
            .bind(saved_at)
            .execute(self.pool())
            .await?;

        debug!("Stored snapshot for {}", date);
        Ok(())
    }

    async fn load_snapshot(&self, date: &DateKey) -> Result<Option<StoredSnapshot>> {
        let row = sqlx::query("SELECT record, saved_at FROM snapshots WHERE date_key = ?")
            .bind(date.as_str())
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(r) => {
                let value: String = r.get("record");
                let saved_at: String = r.get("saved_at");
                let record: SnapshotRecord = serde_json::from_str(&value)
                    .with_context(|| format!("Stored snapshot for {} is not a valid record", date))?;
                Ok(Some(StoredSnapshot {
                    date: date.clone(),
                    record,
                    saved_at,
                }))
            }
            None => Ok(None),
        }
    }

    async fn list_snapshot_dates(&self) -> Result<Vec<DateKey>> {
        let rows = sqlx::query("SELECT date_key FROM snapshots ORDER BY date_key ASC")
            .fetch_all(self.pool())
            .await?;

        let mut dates = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.get("date_key");
            match DateKey::parse(&key) {
                Ok(date) => dates.push(date),
                Err(e) => warn!("Skipping stored snapshot with bad key: {}", e),
            }
        }
        Ok(dates)
    }
}
