#![forbid(unsafe_code)]

pub mod render;
pub mod views;
pub mod vm;

pub use render::{render_completed_page, render_quiz_page, render_table_page};
pub use vm::{CompletedVm, QuizPageVm, TableVm};
