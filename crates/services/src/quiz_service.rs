use std::sync::Arc;

use quiz_core::grading;
use quiz_core::model::{Progress, PromptCatalog, QueryResult, SessionId};
use quiz_core::sequencer::{self, Verdict};
use storage::repository::{ProgressRepository, QueryExecutor, QueryLog, StudentTable};

use crate::Clock;
use crate::error::{AttemptError, QuizServiceError};

/// Where a session stands, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOverview {
    pub prompt: String,
    pub score: u32,
    /// 1-based position of the current prompt.
    pub position: usize,
    pub total: usize,
}

/// What happened to a submitted attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The query ran; `verdict` says whether it matched the expected text.
    Graded {
        result: QueryResult,
        verdict: Verdict,
    },
    Rejected(AttemptError),
}

/// Result of one submission plus the session state after it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub submitted: String,
    pub outcome: AttemptOutcome,
    pub overview: QuizOverview,
}

impl AttemptReport {
    /// Feedback line for a graded attempt.
    #[must_use]
    pub fn feedback(&self) -> Option<String> {
        match &self.outcome {
            AttemptOutcome::Graded { verdict, .. } => Some(verdict.feedback()),
            AttemptOutcome::Rejected(_) => None,
        }
    }

    /// Error line for a rejected attempt.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match &self.outcome {
            AttemptOutcome::Rejected(err) => Some(err.to_string()),
            AttemptOutcome::Graded { .. } => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&QueryResult> {
        match &self.outcome {
            AttemptOutcome::Graded { result, .. } => Some(result),
            AttemptOutcome::Rejected(_) => None,
        }
    }
}

/// Runs attempts against the practice table and tracks per-session progress.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    catalog: Arc<PromptCatalog>,
    executor: Arc<dyn QueryExecutor>,
    students: Arc<dyn StudentTable>,
    progress: Arc<dyn ProgressRepository>,
    query_log: Arc<dyn QueryLog>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<PromptCatalog>,
        executor: Arc<dyn QueryExecutor>,
        students: Arc<dyn StudentTable>,
        progress: Arc<dyn ProgressRepository>,
        query_log: Arc<dyn QueryLog>,
    ) -> Self {
        Self {
            clock,
            catalog,
            executor,
            students,
            progress,
            query_log,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    /// Stored progress for the session, or fresh progress on first contact.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the progress store fails.
    pub async fn progress_for(&self, session: SessionId) -> Result<Progress, QuizServiceError> {
        let progress = self
            .progress
            .load_progress(session)
            .await?
            .unwrap_or_default();
        Ok(progress.normalized(self.catalog.len()))
    }

    /// Current prompt and score for the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the progress store fails.
    pub async fn overview(&self, session: SessionId) -> Result<QuizOverview, QuizServiceError> {
        let progress = self.progress_for(session).await?;
        Ok(self.overview_of(&progress))
    }

    /// Descriptions of prompts the session has been credited for, in order.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the progress store fails.
    pub async fn completed(&self, session: SessionId) -> Result<Vec<String>, QuizServiceError> {
        let progress = self.progress_for(session).await?;
        Ok(progress.completed().to_vec())
    }

    /// The whole practice table.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the table cannot be read.
    pub async fn practice_table(&self) -> Result<QueryResult, QuizServiceError> {
        Ok(self.students.snapshot().await?)
    }

    /// Submit one attempt for the session's current prompt.
    ///
    /// Rejected and failing attempts leave stored progress untouched. Only a
    /// passing attempt writes progress back.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` only for progress store failures. Guard and
    /// execution failures are reported inside the `AttemptReport`.
    pub async fn submit(
        &self,
        session: SessionId,
        raw: &str,
    ) -> Result<AttemptReport, QuizServiceError> {
        let progress = self.progress_for(session).await?;

        if !grading::is_allowed(raw) {
            tracing::debug!(%session, "attempt rejected by read-only guard");
            let outcome = AttemptOutcome::Rejected(AttemptError::GuardRejected);
            return Ok(self.report(raw, outcome, &progress));
        }

        if let Err(err) = self.query_log.append(self.clock.now(), raw).await {
            tracing::warn!(error = %err, "failed to append query log");
        }

        let result = match self.executor.execute(raw).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%session, error = %err, "attempt failed to execute");
                let outcome =
                    AttemptOutcome::Rejected(AttemptError::ExecutionFailed(err.to_string()));
                return Ok(self.report(raw, outcome, &progress));
            }
        };

        let (progress, verdict) = sequencer::grade(&self.catalog, progress, raw);
        match verdict {
            Verdict::Passed(advance) => {
                self.progress.save_progress(session, &progress).await?;
                tracing::info!(
                    %session,
                    credited = advance.credited,
                    wrapped = advance.wrapped,
                    score = progress.score(),
                    "attempt passed"
                );
            }
            Verdict::Failed => {
                tracing::debug!(%session, "attempt did not match expected query");
            }
        }

        Ok(self.report(raw, AttemptOutcome::Graded { result, verdict }, &progress))
    }

    fn overview_of(&self, progress: &Progress) -> QuizOverview {
        let prompt = sequencer::current_prompt(&self.catalog, progress);
        QuizOverview {
            prompt: prompt.description().to_string(),
            score: progress.score(),
            position: progress.cursor() + 1,
            total: self.catalog.len(),
        }
    }

    fn report(&self, raw: &str, outcome: AttemptOutcome, progress: &Progress) -> AttemptReport {
        AttemptReport {
            submitted: raw.to_string(),
            outcome,
            overview: self.overview_of(progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::Cell;
    use quiz_core::time::fixed_clock;
    use std::sync::Mutex;
    use storage::repository::{InMemoryRepository, StorageError};

    #[derive(Default)]
    struct ScriptedExecutor {
        calls: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl QueryExecutor for ScriptedExecutor {
        async fn execute(&self, sql: &str) -> Result<QueryResult, StorageError> {
            self.calls.lock().unwrap().push(sql.to_string());
            if let Some(message) = &self.fail_with {
                return Err(StorageError::Execution(message.clone()));
            }
            Ok(QueryResult::new(vec!["id".into()], vec![vec![Cell::Integer(1)]]))
        }
    }

    #[async_trait]
    impl StudentTable for ScriptedExecutor {
        async fn snapshot(&self) -> Result<QueryResult, StorageError> {
            Ok(QueryResult::default())
        }

        async fn reseed(&self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn service(executor: Arc<ScriptedExecutor>, repo: &InMemoryRepository) -> QuizService {
        QuizService::new(
            fixed_clock(),
            Arc::new(PromptCatalog::builtin().unwrap()),
            executor.clone(),
            executor,
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    #[tokio::test]
    async fn first_contact_shows_first_prompt() {
        let repo = InMemoryRepository::new();
        let quiz = service(Arc::new(ScriptedExecutor::default()), &repo);

        let overview = quiz.overview(SessionId::generate()).await.unwrap();
        assert_eq!(overview.prompt, "List all students");
        assert_eq!(overview.score, 0);
        assert_eq!(overview.position, 1);
        assert_eq!(overview.total, 3);
    }

    #[tokio::test]
    async fn correct_attempt_credits_and_persists() {
        let repo = InMemoryRepository::new();
        let quiz = service(Arc::new(ScriptedExecutor::default()), &repo);
        let session = SessionId::generate();

        let report = quiz.submit(session, "SELECT * FROM ogrenciler").await.unwrap();
        assert_eq!(report.feedback().as_deref(), Some(sequencer::CORRECT_CREDITED));
        assert_eq!(report.overview.score, 1);
        assert_eq!(report.overview.prompt, "List students older than 21");

        let stored = repo.load_progress(session).await.unwrap().unwrap();
        assert_eq!(stored.cursor(), 1);
        assert_eq!(quiz.completed(session).await.unwrap(), vec!["List all students"]);
    }

    #[tokio::test]
    async fn guard_rejection_skips_execution_and_log() {
        let repo = InMemoryRepository::new();
        let executor = Arc::new(ScriptedExecutor::default());
        let quiz = service(executor.clone(), &repo);
        let session = SessionId::generate();

        let report = quiz.submit(session, "UPDATE ogrenciler SET yas=0").await.unwrap();
        assert_eq!(
            report.outcome,
            AttemptOutcome::Rejected(AttemptError::GuardRejected)
        );
        assert_eq!(report.overview.score, 0);
        assert!(executor.calls.lock().unwrap().is_empty());
        assert!(repo.logged_lines().unwrap().is_empty());
        assert!(repo.load_progress(session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn execution_failure_is_surfaced_and_state_kept() {
        let repo = InMemoryRepository::new();
        let executor = Arc::new(ScriptedExecutor {
            fail_with: Some("no such column: nope".into()),
            ..ScriptedExecutor::default()
        });
        let quiz = service(executor, &repo);
        let session = SessionId::generate();

        let report = quiz.submit(session, "SELECT nope FROM ogrenciler").await.unwrap();
        assert_eq!(report.error().as_deref(), Some("Error: no such column: nope"));
        assert!(report.result().is_none());
        assert!(repo.load_progress(session).await.unwrap().is_none());
        // The guard passed, so the attempt is still logged.
        assert_eq!(repo.logged_lines().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn wrong_attempt_keeps_prompt_and_asks_for_retry() {
        let repo = InMemoryRepository::new();
        let quiz = service(Arc::new(ScriptedExecutor::default()), &repo);
        let session = SessionId::generate();

        let report = quiz.submit(session, "SELECT ad FROM ogrenciler").await.unwrap();
        assert_eq!(report.feedback().as_deref(), Some(sequencer::TRY_AGAIN));
        assert_eq!(report.overview.position, 1);
        assert!(report.result().is_some());
        assert!(repo.load_progress(session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logged_line_carries_clock_timestamp() {
        let repo = InMemoryRepository::new();
        let quiz = service(Arc::new(ScriptedExecutor::default()), &repo);

        quiz.submit(SessionId::generate(), "select 1").await.unwrap();
        assert_eq!(
            repo.logged_lines().unwrap(),
            vec!["[2023-11-14 22:13:20.000000] select 1\n".to_string()]
        );
    }
}
