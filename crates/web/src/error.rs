//! Server error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use services::QuizServiceError;
use thiserror::Error;

/// Errors that can occur in the quiz server
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Progress or table storage failed while handling a request
    #[error(transparent)]
    Quiz(#[from] QuizServiceError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
