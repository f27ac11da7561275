use serde::{Deserialize, Serialize};

use super::RagError;

/// A regulatory passage returned by retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub score: f32,
}

/// Ranked passage search over an externally maintained document index.
pub trait PassageSearch: Send + Sync {
    fn search(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RagError>;

    /// Checked once when the lookup is built; an error switches the lookup
    /// to text-model-only mode for the rest of the process.
    fn health_check(&self) -> Result<(), RagError> {
        Ok(())
    }
}

/// How regulatory questions are answered for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupMode {
    /// Retrieved passages are given to the model as context.
    Retrieval,
    /// The model answers without retrieved context.
    ModelOnly,
    /// No text model: static rule table only.
    StaticOnly,
}
