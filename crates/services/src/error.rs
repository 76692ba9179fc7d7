//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::CatalogError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Fixed message shown when a submission does not start with `select`.
pub const GUARD_REJECTED_MESSAGE: &str = "Only SELECT queries are allowed.";

/// Why an attempt ended without being graded.
///
/// Both kinds end the request with a message and leave progress untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("Only SELECT queries are allowed.")]
    GuardRejected,
    #[error("Error: {0}")]
    ExecutionFailed(String),
}

/// Errors emitted by `QuizService` when progress cannot be loaded or saved.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
