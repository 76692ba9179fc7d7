use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::time::format_log_timestamp;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::repository::{QueryLog, StorageError};

/// Render one log line: `[<timestamp>] <query>\n`, the timestamp in UTC.
#[must_use]
pub fn format_log_line(at: DateTime<Utc>, query: &str) -> String {
    format!("[{}] {query}\n", format_log_timestamp(at))
}

/// Appends accepted queries to a plain text file.
///
/// The file is opened per append so external rotation is picked up.
#[derive(Debug)]
pub struct FileQueryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileQueryLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl QueryLog for FileQueryLog {
    async fn append(&self, at: DateTime<Utc>, query: &str) -> Result<(), StorageError> {
        let line = format_log_line(at, query);
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }
}
