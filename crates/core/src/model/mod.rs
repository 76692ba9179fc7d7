mod ids;
mod progress;
mod prompt;
mod query_result;

pub use ids::{ParseSessionIdError, SessionId};
pub use progress::{Progress, ProgressError};
pub use prompt::{CatalogError, Prompt, PromptCatalog};
pub use query_result::{Cell, QueryResult};
