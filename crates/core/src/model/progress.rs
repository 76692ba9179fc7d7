use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("score ({score}) exceeds completed prompt count ({completed})")]
    ScoreExceedsCompleted { score: u32, completed: usize },

    #[error("completed prompt listed twice: {description:?}")]
    DuplicateCompleted { description: String },
}

/// Per-session quiz progress.
///
/// `completed` keeps insertion order so the completed list renders in the
/// order prompts were first solved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    score: u32,
    cursor: usize,
    completed: Vec<String>,
}

impl Progress {
    /// Fresh progress: zero score, first prompt, nothing completed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate progress from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the score is larger than the completed set
    /// or a description appears twice.
    pub fn from_persisted(
        score: u32,
        cursor: usize,
        completed: Vec<String>,
    ) -> Result<Self, ProgressError> {
        for (i, description) in completed.iter().enumerate() {
            if completed[..i].contains(description) {
                return Err(ProgressError::DuplicateCompleted {
                    description: description.clone(),
                });
            }
        }
        if usize::try_from(score).map_or(true, |s| s > completed.len()) {
            return Err(ProgressError::ScoreExceedsCompleted {
                score,
                completed: completed.len(),
            });
        }
        Ok(Self {
            score,
            cursor,
            completed,
        })
    }

    /// Clamp the cursor into `0..prompt_count`.
    ///
    /// A stored cursor can only fall out of range if the catalog shrank
    /// between runs; such progress restarts at the first prompt.
    #[must_use]
    pub fn normalized(mut self, prompt_count: usize) -> Self {
        if self.cursor >= prompt_count {
            self.cursor = 0;
        }
        self
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    #[must_use]
    pub fn is_completed(&self, description: &str) -> bool {
        self.completed.iter().any(|d| d == description)
    }

    /// Credit a prompt. Returns false if it was already credited.
    pub(crate) fn credit(&mut self, description: &str) -> bool {
        if self.is_completed(description) {
            return false;
        }
        self.completed.push(description.to_string());
        self.score = self.score.saturating_add(1);
        true
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }
}
