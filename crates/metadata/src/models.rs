//! Database models mapping to the metadata schema.

use annex_core::RecordFields;
use sqlx::FromRow;
use time::OffsetDateTime;

/// One metadata record, keyed by file path.
///
/// The surrogate `id` stays inside this crate; callers address records by
/// path only. A record's existence is independent of the referenced file's
/// existence on disk.
#[derive(Debug, Clone, FromRow)]
pub struct FileRecordRow {
    pub id: i64,
    pub file_path: String,
    pub project_number: Option<String>,
    pub department: Option<String>,
    pub revision: Option<String>,
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub area: Option<String>,
    pub progress: Option<String>,
    pub notes: Option<String>,
    /// Set once at first creation, UTC. Never modified afterwards.
    pub created_at: OffsetDateTime,
    /// Refreshed on every upsert, including no-op upserts of identical values.
    pub updated_at: OffsetDateTime,
}

impl FileRecordRow {
    /// Extract the caller-facing field set.
    pub fn into_fields(self) -> RecordFields {
        RecordFields {
            project_number: self.project_number,
            department: self.department,
            revision: self.revision,
            kind: self.kind,
            area: self.area,
            progress: self.progress,
            notes: self.notes,
        }
    }
}

/// Listing row for recorded paths.
#[derive(Debug, Clone, FromRow)]
pub struct RecordSummary {
    pub file_path: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
