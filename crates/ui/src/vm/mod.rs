mod quiz_vm;
mod table_vm;

pub use quiz_vm::{CompletedVm, QuizPageVm};
pub use table_vm::TableVm;
