use async_trait::async_trait;
use chrono::Utc;
use quiz_core::model::{Progress, SessionId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn_err, progress_err, ser, u32_from_i64, usize_from_i64, usize_to_i64};
use crate::repository::{ProgressRecord, ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self, id: SessionId) -> Result<Option<Progress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT score, cursor, completed
            FROM quiz_sessions
            WHERE session_id = ?1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let score: i64 = row.try_get("score").map_err(ser)?;
        let cursor: i64 = row.try_get("cursor").map_err(ser)?;
        let completed: String = row.try_get("completed").map_err(ser)?;
        let completed: Vec<String> = serde_json::from_str(&completed).map_err(|err| {
            tracing::warn!(session = %id, error = %err, "stored completed list is not valid JSON");
            ser(err)
        })?;

        let record = ProgressRecord {
            session_id: id,
            score: u32_from_i64("score", score)?,
            cursor: usize_from_i64("cursor", cursor)?,
            completed,
        };
        record.into_progress().map(Some).map_err(|err| {
            tracing::warn!(session = %id, error = %err, "stored progress is inconsistent");
            progress_err(err)
        })
    }

    async fn save_progress(&self, id: SessionId, progress: &Progress) -> Result<(), StorageError> {
        let record = ProgressRecord::from_progress(id, progress);
        let completed = serde_json::to_string(&record.completed).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO quiz_sessions (session_id, score, cursor, completed, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(session_id) DO UPDATE SET
                score = excluded.score,
                cursor = excluded.cursor,
                completed = excluded.completed,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.session_id.to_string())
        .bind(i64::from(record.score))
        .bind(usize_to_i64("cursor", record.cursor)?)
        .bind(completed)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn_err)?;

        Ok(())
    }
}
