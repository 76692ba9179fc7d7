//! Shared test utilities for web integration tests

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use quiz_core::time::fixed_clock;
use services::AppServices;
use tower::ServiceExt;
use web::{AppState, create_router};

pub struct TestApp {
    pub router: Router,
    pub log_path: PathBuf,
    _dir: tempfile::TempDir,
}

/// Router over a freshly seeded in-memory database and a temp log file
pub async fn test_app(name: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("query_logs.txt");
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let services = AppServices::new_sqlite(&url, &log_path, fixed_clock())
        .await
        .unwrap();
    let router = create_router(Arc::new(AppState::from_services(&services)));
    TestApp {
        router,
        log_path,
        _dir: dir,
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(router: &Router, request: Request<Body>) -> Reply {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
