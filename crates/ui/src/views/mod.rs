mod completed;
mod quiz;
mod shared;
mod table;

#[cfg(test)]
mod view_smoke;

pub use completed::{CompletedPage, CompletedPageProps};
pub use quiz::{QuizPage, QuizPageProps};
pub use shared::{ResultTable, ResultTableProps};
pub use table::{TablePage, TablePageProps};
