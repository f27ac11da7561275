use std::sync::Arc;

use super::citation::{
    extract_authorized_entities, extract_collection_targets, extract_compliance_terms,
    extract_mandatory_steps, extract_penalties, extract_regulatory_refs,
    extract_reporting_requirements, extract_section_citations,
};
use super::fallback::{
    static_compliance, static_hazard_protocol, unavailable_compliance, unavailable_epr,
};
use super::prompt::{
    build_legal_prompt, disposal_question, epr_question, hazard_protocol_question,
    CONTEXT_UNAVAILABLE, MODEL_KNOWLEDGE_SOURCE, NO_MATCHING_PASSAGES,
};
use super::types::{LookupMode, PassageSearch};
use super::RagError;
use crate::models::{ComplianceInfo, ComplianceSource, EprObligations, HazardProtocol, SimilarCase};
use crate::pipeline::llm::{LlmError, TextModel};

/// Maximum characters of a passage shown in a similar-case result.
const SIMILAR_CASE_PREVIEW_CHARS: usize = 500;

/// A model answer plus where its context came from.
struct Answer {
    text: String,
    sources: Vec<String>,
    provenance: ComplianceSource,
}

/// Regulatory lookup over CPCB rules.
///
/// The mode is fixed when the lookup is built: retrieval-augmented when a
/// healthy passage index is supplied, model-only otherwise, static table
/// only when there is no text model. Public operations never fail except
/// `similar_cases`, which needs the index.
pub struct RegulatoryLookup {
    model: Option<Arc<dyn TextModel>>,
    retriever: Option<Arc<dyn PassageSearch>>,
    top_k: usize,
}

impl RegulatoryLookup {
    pub fn new(
        model: Option<Arc<dyn TextModel>>,
        retriever: Option<Arc<dyn PassageSearch>>,
        top_k: usize,
    ) -> Self {
        let retriever = retriever.and_then(|r| match r.health_check() {
            Ok(()) => Some(r),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Retrieval backend unavailable, switching to model-only mode"
                );
                None
            }
        });
        let lookup = Self {
            model,
            retriever,
            top_k: top_k.max(1),
        };
        tracing::info!(mode = ?lookup.mode(), top_k = lookup.top_k, "Regulatory lookup ready");
        lookup
    }

    /// Static-table-only lookup.
    pub fn offline() -> Self {
        Self::new(None, None, super::retrieval::DEFAULT_TOP_K)
    }

    pub fn mode(&self) -> LookupMode {
        match (&self.model, &self.retriever) {
            (None, _) => LookupMode::StaticOnly,
            (Some(_), Some(_)) => LookupMode::Retrieval,
            (Some(_), None) => LookupMode::ModelOnly,
        }
    }

    /// CPCB disposal guidance for a material. Never fails.
    ///
    /// Rate limits get the static rule table; any other failure gets the
    /// "temporarily unavailable" record.
    pub fn guidelines(&self, material_type: &str) -> ComplianceInfo {
        let _span = tracing::info_span!("regulatory_lookup", material = %material_type).entered();
        let start = std::time::Instant::now();

        if self.model.is_none() {
            tracing::debug!("No text model configured, using static rule table");
            return static_compliance(material_type);
        }

        match self.answer(&disposal_question(material_type)) {
            Ok(answer) => {
                tracing::info!(
                    provenance = %answer.provenance,
                    sources = answer.sources.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Regulatory guidance generated"
                );
                ComplianceInfo {
                    material_type: material_type.to_string(),
                    compliance_requirements: extract_compliance_terms(&answer.text),
                    citations: extract_section_citations(&answer.text),
                    guidelines: answer.text,
                    sources: answer.sources,
                    provenance: answer.provenance,
                }
            }
            Err(e) if e.is_rate_limited() => {
                tracing::warn!(
                    error = %e,
                    "Regulatory lookup rate limited, using static rule table"
                );
                static_compliance(material_type)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Regulatory lookup failed");
                unavailable_compliance(material_type)
            }
        }
    }

    /// Emergency handling protocol for a hazardous item. Never fails.
    pub fn hazardous_protocol(&self, material_description: &str) -> HazardProtocol {
        match self.answer(&hazard_protocol_question(material_description)) {
            Ok(answer) => HazardProtocol {
                material_description: material_description.to_string(),
                regulatory_references: extract_regulatory_refs(&answer.text),
                mandatory_steps: extract_mandatory_steps(&answer.text),
                authorized_handlers: extract_authorized_entities(&answer.text),
                emergency_protocol: answer.text,
                provenance: answer.provenance,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Hazard protocol lookup failed, using standard protocol"
                );
                static_hazard_protocol(material_description)
            }
        }
    }

    /// EPR obligations for a product category. Never fails.
    pub fn epr_obligations(&self, product_category: &str) -> EprObligations {
        match self.answer(&epr_question(product_category)) {
            Ok(answer) => EprObligations {
                product_category: product_category.to_string(),
                collection_targets: extract_collection_targets(&answer.text),
                reporting_requirements: extract_reporting_requirements(&answer.text),
                penalty_structure: extract_penalties(&answer.text),
                obligations: answer.text,
                provenance: answer.provenance,
            },
            Err(e) => {
                tracing::warn!(error = %e, "EPR lookup failed");
                unavailable_epr(product_category, &e.to_string())
            }
        }
    }

    /// Raw passages similar to a scenario, previews capped at 500 chars.
    pub fn similar_cases(&self, scenario: &str) -> Result<Vec<SimilarCase>, RagError> {
        let retriever = self.retriever.as_ref().ok_or_else(|| {
            RagError::RetrievalUnavailable("no passage index configured".into())
        })?;
        let passages = retriever.search(scenario, self.top_k)?;
        Ok(passages
            .into_iter()
            .map(|p| SimilarCase {
                content: preview(&p.content),
                source: p.source,
                relevance: p.score,
            })
            .collect())
    }

    fn answer(&self, question: &str) -> Result<Answer, RagError> {
        let model = self.model.as_ref().ok_or(RagError::NoModel)?;

        let (context, sources, provenance) = match &self.retriever {
            Some(retriever) => {
                let passages = retriever
                    .search(question, self.top_k)
                    .map_err(|e| RagError::SearchFailed(e.to_string()))?;
                let mut sources: Vec<String> = Vec::new();
                for p in &passages {
                    if !sources.contains(&p.source) {
                        sources.push(p.source.clone());
                    }
                }
                let context = if passages.is_empty() {
                    NO_MATCHING_PASSAGES.to_string()
                } else {
                    passages
                        .iter()
                        .map(|p| p.content.as_str())
                        .collect::<Vec<_>>()
                        .join("\n\n")
                };
                (context, sources, ComplianceSource::Retrieval)
            }
            None => (
                CONTEXT_UNAVAILABLE.to_string(),
                vec![MODEL_KNOWLEDGE_SOURCE.to_string()],
                ComplianceSource::ModelOnly,
            ),
        };

        let text = model.generate(&build_legal_prompt(&context, question))?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::MalformedResponse("Empty regulatory answer".into()).into());
        }

        Ok(Answer {
            text,
            sources,
            provenance,
        })
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > SIMILAR_CASE_PREVIEW_CHARS {
        let head: String = content.chars().take(SIMILAR_CASE_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}
