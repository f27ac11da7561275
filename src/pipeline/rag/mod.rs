pub mod citation;
pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod retrieval;
pub mod types;

pub use citation::*;
pub use fallback::*;
pub use orchestrator::*;
pub use prompt::*;
pub use retrieval::*;
pub use types::*;

use thiserror::Error;

use crate::pipeline::llm::LlmError;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("Retrieval backend unavailable: {0}")]
    RetrievalUnavailable(String),

    #[error("Retrieval failed: {0}")]
    SearchFailed(String),

    #[error("Text model failed: {0}")]
    Model(#[from] LlmError),

    #[error("No text model configured")]
    NoModel,

    #[error("Cannot read passage corpus {path}: {source}")]
    CorpusIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid passage corpus: {0}")]
    CorpusParse(#[from] serde_json::Error),
}

impl RagError {
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Model(e) => e.is_rate_limited(),
            other => {
                let text = other.to_string();
                text.contains("429") || text.contains("RESOURCE_EXHAUSTED")
            }
        }
    }
}
