use std::path::Path;
use std::sync::Arc;

use quiz_core::model::PromptCatalog;
use storage::repository::{Storage, StudentTable};

use crate::Clock;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    students: Arc<dyn StudentTable>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and reset the practice table
    /// to its seed rows.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization, seeding or the
    /// prompt catalog fails.
    pub async fn new_sqlite(
        db_url: &str,
        log_path: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, log_path).await?;
        let services = Self::from_storage(storage, clock, PromptCatalog::builtin()?);
        services.reseed().await?;
        Ok(services)
    }

    /// Build services over an already prepared storage bundle.
    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock, catalog: PromptCatalog) -> Self {
        let quiz = Arc::new(QuizService::new(
            clock,
            Arc::new(catalog),
            Arc::clone(&storage.executor),
            Arc::clone(&storage.students),
            Arc::clone(&storage.progress),
            Arc::clone(&storage.query_log),
        ));
        Self {
            quiz,
            students: storage.students,
        }
    }

    /// Replace the practice table contents with the seed rows.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the reset fails.
    pub async fn reseed(&self) -> Result<(), AppServicesError> {
        self.students.reseed().await?;
        tracing::info!("practice table reset to seed rows");
        Ok(())
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
