//! HTTP server module

mod pages;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::AppState;

pub use pages::AttemptForm;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::quiz_page).post(pages::submit_attempt))
        .route("/table", get(pages::table_page))
        .route("/completed", get(pages::completed_page))
        .with_state(state)
}
