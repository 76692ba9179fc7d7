use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::query_log::FileQueryLog;
use crate::repository::{ProgressRepository, QueryExecutor, QueryLog, Storage, StudentTable};

mod mapping;
mod migrate;
mod progress_repo;
mod query_repo;
mod seed;

pub use query_repo::MULTIPLE_STATEMENTS;
pub use seed::{SEED_STUDENTS, STUDENTS_TABLE};

/// SQLite-backed storage.
///
/// Submitted queries run on `read_only`, whose connections set
/// `PRAGMA query_only`, so anything smuggled past the verb guard cannot write.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
    read_only: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Connect to `SQLite` using the given URL.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if either pool cannot be established or if a
    /// connection pragma fails during setup.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA journal_mode = WAL;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        let read_only = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA query_only = ON;")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        Ok(Self { pool, read_only })
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`, with accepted queries appended to
    /// `log_path`.
    ///
    /// Migrations run here; seeding the practice table is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str, log_path: &Path) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let executor: Arc<dyn QueryExecutor> = Arc::new(repo.clone());
        let students: Arc<dyn StudentTable> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        let query_log: Arc<dyn QueryLog> = Arc::new(FileQueryLog::new(log_path));
        Ok(Self {
            executor,
            students,
            progress,
            query_log,
        })
    }
}
