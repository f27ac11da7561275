use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::types::{Passage, PassageSearch};
use super::RagError;

pub const DEFAULT_TOP_K: usize = 4;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "the", "to", "what", "with", "this", "that", "according", "should", "waste",
];

#[derive(Deserialize)]
struct RawPassage {
    content: String,
    #[serde(default = "unknown_source")]
    source: String,
}

fn unknown_source() -> String {
    "Unknown".to_string()
}

struct IndexedPassage {
    content: String,
    source: String,
    terms: HashMap<String, f32>,
    norm: f32,
}

/// Term-frequency cosine index over a small regulatory corpus held in
/// memory. Stands in for an external vector store.
pub struct InMemoryPassageIndex {
    passages: Vec<IndexedPassage>,
}

impl InMemoryPassageIndex {
    pub fn new(passages: Vec<(String, String)>) -> Self {
        let passages = passages
            .into_iter()
            .map(|(content, source)| {
                let terms = term_frequencies(&content);
                let norm = vector_norm(&terms);
                IndexedPassage {
                    content,
                    source,
                    terms,
                    norm,
                }
            })
            .collect();
        Self { passages }
    }

    /// Load a JSON array of `{content, source}` objects.
    pub fn load(path: &Path) -> Result<Self, RagError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RagError::CorpusIo {
            path: path.display().to_string(),
            source,
        })?;
        let index = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), passages = index.len(), "Passage corpus loaded");
        Ok(index)
    }

    pub fn from_json(raw: &str) -> Result<Self, RagError> {
        let parsed: Vec<RawPassage> = serde_json::from_str(raw)?;
        Ok(Self::new(
            parsed.into_iter().map(|p| (p.content, p.source)).collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

impl PassageSearch for InMemoryPassageIndex {
    fn search(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RagError> {
        let query_terms = term_frequencies(query);
        let query_norm = vector_norm(&query_terms);
        if query_norm == 0.0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<Passage> = self
            .passages
            .iter()
            .filter(|p| p.norm > 0.0)
            .filter_map(|p| {
                let dot: f32 = query_terms
                    .iter()
                    .filter_map(|(term, q)| p.terms.get(term).map(|d| q * d))
                    .sum();
                let score = dot / (query_norm * p.norm);
                (score > 0.0).then(|| Passage {
                    content: p.content.clone(),
                    source: p.source.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    fn health_check(&self) -> Result<(), RagError> {
        if self.passages.is_empty() {
            return Err(RagError::RetrievalUnavailable("passage corpus is empty".into()));
        }
        Ok(())
    }
}

fn term_frequencies(text: &str) -> HashMap<String, f32> {
    let mut freqs = HashMap::new();
    for token in text
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .map(|t| t.trim_matches('-').to_lowercase())
        .filter(|t| t.len() >= 2 && !STOPWORDS.contains(&t.as_str()))
    {
        *freqs.entry(token).or_insert(0.0) += 1.0;
    }
    freqs
}

fn vector_norm(terms: &HashMap<String, f32>) -> f32 {
    terms.values().map(|v| v * v).sum::<f32>().sqrt()
}
