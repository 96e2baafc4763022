//! Record store trait and SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::models::{FileRecordRow, RecordSummary};
use annex_core::RecordFields;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use time::OffsetDateTime;

/// Durable mapping from file path to metadata record.
///
/// Paths are compared exactly as given: case-sensitive, no symlink
/// resolution, no trailing-slash canonicalization. Whether the path exists
/// on disk is never consulted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record for `path`, or overwrite an existing one.
    ///
    /// All seven fields are replaced unconditionally with the given set;
    /// there is no partial-update or merge semantic. `created_at` is set on
    /// first creation only; `updated_at` is refreshed on every call, even
    /// when the values are identical.
    async fn upsert(&self, path: &str, fields: &RecordFields) -> MetadataResult<()>;

    /// Exact-match read by path.
    ///
    /// Returns `Ok(None)` when no record exists — never an error. A record
    /// with every field blank is reported as found.
    async fn lookup(&self, path: &str) -> MetadataResult<Option<RecordFields>>;

    /// All recorded paths with their timestamps, ordered by path.
    async fn list_records(&self) -> MetadataResult<Vec<RecordSummary>>;

    /// Number of recorded paths.
    async fn count_records(&self) -> MetadataResult<u64>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;

    /// Flush and close the store. Operations after this fail with
    /// [`MetadataError::Closed`].
    async fn close(&self);
}

/// SQLite-based record store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if necessary) the database at `path` and apply the
    /// schema. Safe to call on every process start.
    pub async fn new(
        path: impl AsRef<Path>,
        busy_timeout_secs: Option<u64>,
    ) -> MetadataResult<Self> {
        let path = path.as_ref();
        let busy_timeout_secs = busy_timeout_secs.unwrap_or(5);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            // One connection serializes all access: SQLite is not safe under
            // concurrent writers, and the single-writer posture avoids
            // "database is locked" failures if the store is ever shared
            // beyond a single-threaded shell.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Apply the idempotent schema. Creating an already-existing table is a
    /// no-op.
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    fn ensure_open(&self) -> MetadataResult<()> {
        if self.pool.is_closed() {
            return Err(MetadataError::Closed);
        }
        Ok(())
    }
}

/// Reject empty paths before touching storage.
fn validate_path(path: &str) -> MetadataResult<&str> {
    if path.is_empty() {
        return Err(MetadataError::InvalidPath(
            "path must not be empty".to_string(),
        ));
    }
    Ok(path)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn upsert(&self, path: &str, fields: &RecordFields) -> MetadataResult<()> {
        let path = validate_path(path)?;
        self.ensure_open()?;

        let now = OffsetDateTime::now_utc();

        // A single statement keeps the operation atomic: either the whole
        // row is written or nothing is. created_at is absent from the
        // conflict update, so it survives re-upserts.
        sqlx::query(
            r#"
            INSERT INTO file_metadata (
                file_path, project_number, department, revision, type,
                area, progress, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(file_path) DO UPDATE SET
                project_number = excluded.project_number,
                department = excluded.department,
                revision = excluded.revision,
                type = excluded.type,
                area = excluded.area,
                progress = excluded.progress,
                notes = excluded.notes,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(path)
        .bind(&fields.project_number)
        .bind(&fields.department)
        .bind(&fields.revision)
        .bind(&fields.kind)
        .bind(&fields.area)
        .bind(&fields.progress)
        .bind(&fields.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(path = %path, "metadata record upserted");
        Ok(())
    }

    async fn lookup(&self, path: &str) -> MetadataResult<Option<RecordFields>> {
        let path = validate_path(path)?;
        self.ensure_open()?;

        let row = sqlx::query_as::<_, FileRecordRow>(
            "SELECT * FROM file_metadata WHERE file_path = ?",
        )
        .bind(path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FileRecordRow::into_fields))
    }

    async fn list_records(&self) -> MetadataResult<Vec<RecordSummary>> {
        self.ensure_open()?;

        let rows = sqlx::query_as::<_, RecordSummary>(
            "SELECT file_path, created_at, updated_at FROM file_metadata ORDER BY file_path",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_records(&self) -> MetadataResult<u64> {
        self.ensure_open()?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM file_metadata")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> MetadataResult<()> {
        self.ensure_open()?;
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

const SCHEMA_SQL: &str = r#"
-- File metadata records, one row per distinct path.
-- Column names are preserved from the original deployment so existing
-- databases keep working.
CREATE TABLE IF NOT EXISTS file_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_path TEXT NOT NULL UNIQUE,
    project_number TEXT,
    department TEXT,
    revision TEXT,
    type TEXT,
    area TEXT,
    progress TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_file_metadata_path ON file_metadata(file_path);
"#;
