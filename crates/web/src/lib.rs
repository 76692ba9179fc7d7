//! HTTP front end for the SQL practice quiz.
//!
//! Serves the quiz form, the practice table and the completed-task list as
//! server-rendered HTML. Session identity travels in a cookie.

mod error;
pub mod http;
pub mod session;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use session::{SESSION_COOKIE, SessionCookie};
pub use state::AppState;

/// Default port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The quiz web server
pub struct QuizServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl QuizServer {
    #[must_use]
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Run the server, binding to the configured address
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address is unavailable, or
    /// `ServerError::Internal` if serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("quiz server listening on {}", addr);
        self.run_with_listener(listener).await
    }

    /// Run the server on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Internal` if serving fails.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let router = create_router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        tracing::info!("quiz server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
