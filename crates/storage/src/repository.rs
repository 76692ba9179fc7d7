use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Progress, ProgressError, QueryResult, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::query_log::format_log_line;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The engine refused or failed to run a submitted query.
    ///
    /// The message is the engine's own text, suitable for display.
    #[error("{0}")]
    Execution(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Persisted shape for a session's progress.
#[derive(Debug, Clone)]
pub struct ProgressRecord {
    pub session_id: SessionId,
    pub score: u32,
    pub cursor: usize,
    pub completed: Vec<String>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_progress(session_id: SessionId, progress: &Progress) -> Self {
        Self {
            session_id,
            score: progress.score(),
            cursor: progress.cursor(),
            completed: progress.completed().to_vec(),
        }
    }

    /// Convert the record back into domain `Progress`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the stored score and completed set disagree.
    pub fn into_progress(self) -> Result<Progress, ProgressError> {
        Progress::from_persisted(self.score, self.cursor, self.completed)
    }
}

/// Runs a submitted query and returns its columns and rows.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute one submitted query.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Execution` carrying the engine's message when the
    /// query is malformed or refers to unknown tables or columns.
    async fn execute(&self, sql: &str) -> Result<QueryResult, StorageError>;
}

/// The fixed practice table.
#[async_trait]
pub trait StudentTable: Send + Sync {
    /// Every row of the practice table, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the table cannot be read.
    async fn snapshot(&self) -> Result<QueryResult, StorageError>;

    /// Replace the table contents with the seed rows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the reset cannot be committed.
    async fn reseed(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch progress for a session, or `None` if it has never been saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn load_progress(&self, id: SessionId) -> Result<Option<Progress>, StorageError>;

    /// Persist progress for a session, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the progress cannot be stored.
    async fn save_progress(&self, id: SessionId, progress: &Progress) -> Result<(), StorageError>;
}

/// Append-only sink for accepted queries. Never read back by the quiz.
#[async_trait]
pub trait QueryLog: Send + Sync {
    /// Append one query with its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the sink cannot be written.
    async fn append(&self, at: DateTime<Utc>, query: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<SessionId, ProgressRecord>>>,
    log_lines: Arc<Mutex<Vec<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended through `QueryLog`, in order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn logged_lines(&self) -> Result<Vec<String>, StorageError> {
        let guard = self
            .log_lines
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self, id: SessionId) -> Result<Option<Progress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(&id)
            .cloned()
            .map(|record| {
                record
                    .into_progress()
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()
    }

    async fn save_progress(&self, id: SessionId, progress: &Progress) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, ProgressRecord::from_progress(id, progress));
        Ok(())
    }
}

#[async_trait]
impl QueryLog for InMemoryRepository {
    async fn append(&self, at: DateTime<Utc>, query: &str) -> Result<(), StorageError> {
        let mut guard = self
            .log_lines
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(format_log_line(at, query));
        Ok(())
    }
}

/// Aggregates the storage collaborators behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub executor: Arc<dyn QueryExecutor>,
    pub students: Arc<dyn StudentTable>,
    pub progress: Arc<dyn ProgressRepository>,
    pub query_log: Arc<dyn QueryLog>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[tokio::test]
    async fn round_trips_progress() {
        let repo = InMemoryRepository::new();
        let id = SessionId::generate();
        assert!(repo.load_progress(id).await.unwrap().is_none());

        let progress =
            Progress::from_persisted(1, 1, vec!["List all students".to_string()]).unwrap();
        repo.save_progress(id, &progress).await.unwrap();

        let fetched = repo.load_progress(id).await.unwrap().unwrap();
        assert_eq!(fetched, progress);
        assert!(repo.load_progress(SessionId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_progress() {
        let repo = InMemoryRepository::new();
        let id = SessionId::generate();
        repo.save_progress(id, &Progress::new()).await.unwrap();
        let later = Progress::from_persisted(1, 2, vec!["a".to_string()]).unwrap();
        repo.save_progress(id, &later).await.unwrap();

        assert_eq!(repo.load_progress(id).await.unwrap().unwrap(), later);
    }

    #[tokio::test]
    async fn query_log_keeps_append_order() {
        let repo = InMemoryRepository::new();
        repo.append(fixed_now(), "SELECT 1").await.unwrap();
        repo.append(fixed_now(), "SELECT 2").await.unwrap();

        let lines = repo.logged_lines().unwrap();
        assert_eq!(
            lines,
            vec![
                "[2023-11-14 22:13:20.000000] SELECT 1\n".to_string(),
                "[2023-11-14 22:13:20.000000] SELECT 2\n".to_string(),
            ]
        );
    }
}
