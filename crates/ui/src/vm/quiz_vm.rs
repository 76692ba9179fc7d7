use services::{AttemptReport, QuizOverview};

use crate::vm::TableVm;

/// Everything the quiz page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPageVm {
    pub prompt: String,
    pub score: u32,
    pub position: usize,
    pub total: usize,
    /// Echoed back into the textarea after a submit.
    pub submitted: String,
    pub feedback: Option<String>,
    pub error: Option<String>,
    pub table: Option<TableVm>,
}

impl From<&QuizOverview> for QuizPageVm {
    fn from(overview: &QuizOverview) -> Self {
        Self {
            prompt: overview.prompt.clone(),
            score: overview.score,
            position: overview.position,
            total: overview.total,
            submitted: String::new(),
            feedback: None,
            error: None,
            table: None,
        }
    }
}

impl From<&AttemptReport> for QuizPageVm {
    fn from(report: &AttemptReport) -> Self {
        Self {
            submitted: report.submitted.clone(),
            feedback: report.feedback(),
            error: report.error(),
            table: report.result().map(TableVm::from),
            ..Self::from(&report.overview)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedVm {
    pub items: Vec<String>,
    pub total: usize,
}
