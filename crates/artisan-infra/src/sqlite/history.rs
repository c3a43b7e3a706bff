//! SQLite prompt history store.
//!
//! Implements `HistoryStore` from `artisan-core` using sqlx with split read/write pools.

use artisan_core::history::HistoryStore;
use artisan_types::error::RepositoryError;
use artisan_types::history::{HistoryRecord, SaveRequest};
use artisan_types::prompt::PromptElements;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: DatabasePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to a domain `HistoryRecord`.
struct HistoryRow {
    id: String,
    idea: String,
    role: String,
    purpose: String,
    constraints: String,
    details: String,
    created_at: String,
    updated_at: String,
}

impl HistoryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            idea: row.try_get("idea")?,
            role: row.try_get("role")?,
            purpose: row.try_get("purpose")?,
            constraints: row.try_get("constraints")?,
            details: row.try_get("details")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<HistoryRecord, RepositoryError> {
        let id = self
            .id
            .parse::<Uuid>()
            .map_err(|e| RepositoryError::Query(format!("invalid history id: {e}")))?;

        Ok(HistoryRecord {
            id,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
            idea: self.idea,
            prompt: PromptElements {
                role: self.role,
                purpose: self.purpose,
                constraints: self.constraints,
                details: self.details,
            },
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

impl HistoryStore for SqliteHistoryStore {
    async fn save(&self, request: &SaveRequest) -> Result<Uuid, RepositoryError> {
        let id = request.id.unwrap_or_else(Uuid::now_v7);
        let now = format_datetime(&Utc::now());

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let revision: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(revision), 0) + 1 FROM prompt_history")
                .fetch_one(&mut *tx)
                .await
                .map_err(query_error)?;

        // An unknown id is inserted as-is; a known id keeps its created_at.
        sqlx::query(
            "INSERT INTO prompt_history (id, idea, role, purpose, constraints, details, created_at, updated_at, revision)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                idea = excluded.idea,
                role = excluded.role,
                purpose = excluded.purpose,
                constraints = excluded.constraints,
                details = excluded.details,
                updated_at = excluded.updated_at,
                revision = excluded.revision",
        )
        .bind(id.to_string())
        .bind(&request.idea)
        .bind(&request.prompt.role)
        .bind(&request.prompt.purpose)
        .bind(&request.prompt.constraints)
        .bind(&request.prompt.details)
        .bind(&now)
        .bind(&now)
        .bind(revision)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        tracing::debug!(history_id = %id, revision, "saved history record");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM prompt_history ORDER BY revision DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                HistoryRow::from_row(row)
                    .map_err(query_error)?
                    .into_record()
            })
            .collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<HistoryRecord>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM prompt_history WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let history_row = HistoryRow::from_row(&row).map_err(query_error)?;
                Ok(Some(history_row.into_record()?))
            }
            None => Ok(None),
        }
    }
}
