use std::sync::Arc;

use services::{AppServices, QuizService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub quiz: Arc<QuizService>,
}

impl AppState {
    #[must_use]
    pub fn new(quiz: Arc<QuizService>) -> Self {
        Self { quiz }
    }

    #[must_use]
    pub fn from_services(services: &AppServices) -> Self {
        Self::new(services.quiz())
    }
}
