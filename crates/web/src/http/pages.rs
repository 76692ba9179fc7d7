//! HTML page handlers

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use serde::Deserialize;
use ui::{CompletedVm, QuizPageVm, TableVm};

use crate::error::ServerError;
use crate::session::SessionCookie;
use crate::AppState;

/// Body of the quiz form
#[derive(Debug, Deserialize)]
pub struct AttemptForm {
    pub query: String,
}

/// Render the current prompt and score
pub async fn quiz_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let session = SessionCookie::from_headers(&headers);
    let overview = state.quiz.overview(session.id).await?;
    let html = ui::render_quiz_page(QuizPageVm::from(&overview));
    Ok(session.attach(Html(html)))
}

/// Submit an attempt and redisplay the page with its outcome
pub async fn submit_attempt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<AttemptForm>,
) -> Result<Response, ServerError> {
    let session = SessionCookie::from_headers(&headers);
    let report = state.quiz.submit(session.id, &form.query).await?;
    let html = ui::render_quiz_page(QuizPageVm::from(&report));
    Ok(session.attach(Html(html)))
}

/// Show every row of the practice table
pub async fn table_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let table = state.quiz.practice_table().await?;
    Ok(Html(ui::render_table_page(TableVm::from(&table))))
}

/// List the prompts this session has been credited for
pub async fn completed_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let session = SessionCookie::from_headers(&headers);
    let items = state.quiz.completed(session.id).await?;
    let vm = CompletedVm {
        items,
        total: state.quiz.catalog().len(),
    };
    Ok(session.attach(Html(ui::render_completed_page(vm))))
}
