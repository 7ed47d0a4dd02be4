pub mod context;
pub mod generator;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod renderer;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use generator::{parse_content, ContentGenerator};
pub use logging::log_filter;
pub use pipeline::{ProposalPipeline, ProposalRequest, RunTrace, Stage};
pub use renderer::{document_file_name, write_document, DocumentRenderer};
pub use search::SearchAdapter;
pub use traits::{CopyModel, WebSearcher};
