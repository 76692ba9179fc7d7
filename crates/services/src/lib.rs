#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, AttemptError, QuizServiceError};
pub use quiz_service::{AttemptOutcome, AttemptReport, QuizOverview, QuizService};
