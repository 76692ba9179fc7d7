//! Cursor/score state machine over the prompt catalog.
//!
//! Everything here is a pure function of `(Progress, submission)`; loading and
//! saving progress is the caller's job.

use crate::grading;
use crate::model::{Progress, Prompt, PromptCatalog};

pub const CORRECT_CREDITED: &str = "Correct! You earned 1 point.";
pub const CORRECT_ALREADY_CREDITED: &str = "Correct! This task was already credited.";
pub const ALL_COMPLETED: &str = "You have completed all tasks!";
pub const TRY_AGAIN: &str = "Not the expected query yet. Try again.";

/// What a passing attempt did to the progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// The prompt was credited for the first time.
    pub credited: bool,
    /// The cursor ran past the last prompt and restarted at 0.
    pub wrapped: bool,
}

/// Outcome of grading one executed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed(Advance),
    Failed,
}

impl Verdict {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed(_))
    }

    /// User-facing feedback line for this verdict.
    #[must_use]
    pub fn feedback(&self) -> String {
        match self {
            Verdict::Failed => TRY_AGAIN.to_string(),
            Verdict::Passed(advance) => {
                let mut message = if advance.credited {
                    CORRECT_CREDITED.to_string()
                } else {
                    CORRECT_ALREADY_CREDITED.to_string()
                };
                if advance.wrapped {
                    message.push(' ');
                    message.push_str(ALL_COMPLETED);
                }
                message
            }
        }
    }
}

/// The prompt the cursor currently points at.
#[must_use]
pub fn current_prompt<'a>(catalog: &'a PromptCatalog, progress: &Progress) -> &'a Prompt {
    debug_assert!(
        progress.cursor() < catalog.len(),
        "cursor {} out of range for {} prompts",
        progress.cursor(),
        catalog.len()
    );
    catalog.wrapping_get(progress.cursor())
}

/// Apply a passing attempt: credit the current prompt once, then advance.
#[must_use]
pub fn record_pass(catalog: &PromptCatalog, mut progress: Progress) -> (Progress, Advance) {
    let description = current_prompt(catalog, &progress).description().to_string();
    let credited = progress.credit(&description);

    let mut next = progress.cursor() + 1;
    let wrapped = next >= catalog.len();
    if wrapped {
        next = 0;
    }
    progress.set_cursor(next);

    (progress, Advance { credited, wrapped })
}

/// Grade an attempt that already executed successfully.
///
/// A failing attempt returns the progress untouched.
#[must_use]
pub fn grade(catalog: &PromptCatalog, progress: Progress, submitted: &str) -> (Progress, Verdict) {
    let expected = current_prompt(catalog, &progress).expected_query();
    if !grading::evaluate(submitted, expected) {
        return (progress, Verdict::Failed);
    }
    let (progress, advance) = record_pass(catalog, progress);
    (progress, Verdict::Passed(advance))
}
