//! Waste analysis orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! vision → hazard → regulatory lookup → instructions → facilities → assembly.
//!
//! Every stage is injected, so the orchestrator is fully testable with
//! mock model clients and an in-memory catalog.

use std::sync::Arc;

use base64::Engine;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{AppConfig, ConfigError};
use crate::models::{
    ComplianceInfo, FacilityMatch, FinalOutput, GeoPoint, InstructionPayload, LocalRule,
    MaterialAnalysis, NearbyOption, PipelineResult, SafetyAssessment,
};
use crate::pipeline::facilities::{CatalogError, FacilityCatalog, FacilityQuery};
use crate::pipeline::instructions::InstructionGenerator;
use crate::pipeline::llm::{
    GeminiClient, LlmError, OpenRouterClient, TextModel, VisionModel, GEMINI_MODELS,
};
use crate::pipeline::rag::{InMemoryPassageIndex, PassageSearch, RegulatoryLookup};
use crate::pipeline::safety::{assess, compliance_requirements};
use crate::pipeline::vision::{VisionClassifier, VisionError};

/// Facilities returned per analysis.
pub const NEARBY_LIMIT: usize = 3;

/// Display type of every projected nearby option.
pub const COLLECTION_CENTER: &str = "collection_center";

/// Source label attached to citations in `local_rules`.
pub const CITATION_SOURCE: &str = "CPCB 2016";

/// Rule label attached to source documents in `local_rules`.
pub const SOURCE_DOCUMENT_RULE: &str = "Source document";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Facility catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Model client setup failed: {0}")]
    ModelSetup(#[from] LlmError),

    #[error("Vision stage failed: {0}")]
    Vision(#[from] VisionError),
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One photographed item plus optional locality hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisRequest<'a> {
    pub image_bytes: &'a [u8],
    pub filename: Option<&'a str>,
    pub city: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(image_bytes: &'a [u8]) -> Self {
        Self {
            image_bytes,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Owns every stage for the process lifetime. `run` takes `&self` and
/// touches no shared mutable state, so one pipeline serves concurrent
/// requests.
pub struct WastePipeline {
    vision: VisionClassifier,
    lookup: RegulatoryLookup,
    instructions: InstructionGenerator,
    catalog: Arc<FacilityCatalog>,
}

impl WastePipeline {
    pub fn new(
        vision: VisionClassifier,
        lookup: RegulatoryLookup,
        instructions: InstructionGenerator,
        catalog: Arc<FacilityCatalog>,
    ) -> Self {
        Self {
            vision,
            lookup,
            instructions,
            catalog,
        }
    }

    /// Build every stage from configuration.
    ///
    /// Fails on configuration errors only: invalid settings, an unreadable
    /// catalog, or (in strict mode) an unusable Gemini client. Missing
    /// credentials in tolerant mode just leave the fallbacks in charge.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let catalog = Arc::new(FacilityCatalog::load(&config.recyclers_path)?);

        let gemini = match build_gemini(config) {
            Ok(client) => client,
            Err(e) if config.strict_genai => return Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Gemini unavailable, vision and regulatory lookup will use fallbacks"
                );
                None
            }
        };

        let instruction_model: Option<Arc<dyn TextModel>> = match build_openrouter(config) {
            Ok(Some(client)) => Some(Arc::new(client)),
            Ok(None) => gemini.clone().map(|g| g as Arc<dyn TextModel>),
            Err(e) => {
                tracing::warn!(error = %e, "OpenRouter client setup failed");
                gemini.clone().map(|g| g as Arc<dyn TextModel>)
            }
        };

        let retriever: Option<Arc<dyn PassageSearch>> = match &config.cpcb_passages_path {
            Some(path) => match InMemoryPassageIndex::load(path) {
                Ok(index) => Some(Arc::new(index)),
                Err(e) => {
                    tracing::warn!(error = %e, "Passage corpus unavailable");
                    None
                }
            },
            None => None,
        };

        let vision_model = gemini.clone().map(|g| g as Arc<dyn VisionModel>);
        let text_model = gemini.map(|g| g as Arc<dyn TextModel>);

        tracing::info!(
            vision_model = vision_model.is_some(),
            instruction_model = instruction_model.is_some(),
            strict = config.strict_genai,
            facilities = catalog.len(),
            "Pipeline configured"
        );

        Ok(Self::new(
            VisionClassifier::new(vision_model, config.strict_genai),
            RegulatoryLookup::new(text_model, retriever, config.retrieval_top_k),
            InstructionGenerator::new(instruction_model),
            catalog,
        ))
    }

    /// No remote models: every stage runs its deterministic path.
    pub fn offline(catalog: Arc<FacilityCatalog>) -> Self {
        Self::new(
            VisionClassifier::offline(),
            RegulatoryLookup::offline(),
            InstructionGenerator::offline(),
            catalog,
        )
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    pub fn lookup(&self) -> &RegulatoryLookup {
        &self.lookup
    }

    /// Analyse one item. Only an undecodable image, or a vision model
    /// failure in strict mode, aborts the run.
    pub fn run(&self, request: &AnalysisRequest<'_>) -> Result<PipelineResult, PipelineError> {
        let run_id = Uuid::new_v4();
        let _span = tracing::info_span!(
            "pipeline_run",
            run_id = %run_id,
            image_size = request.image_bytes.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let material_analysis = self.vision.analyze(request.image_bytes, request.filename)?;

        let safety_assessment = assess(&material_analysis);
        let regulatory_requirements = compliance_requirements(&safety_assessment.hazard_categories);

        let compliance_info = self.lookup.guidelines(&material_analysis.material_type);

        let instructions = self.instructions.generate(
            &material_analysis,
            &safety_assessment,
            &compliance_info,
            request.city,
        );

        let location = GeoPoint::validated(request.latitude, request.longitude);
        if location.is_none() && (request.latitude.is_some() || request.longitude.is_some()) {
            tracing::warn!(
                latitude = ?request.latitude,
                longitude = ?request.longitude,
                "Ignoring invalid coordinates"
            );
        }
        let nearby_options = self.catalog.match_facilities(&FacilityQuery {
            material_type: &material_analysis.material_type,
            city: request.city,
            location,
            hazardous: safety_assessment.is_hazardous,
            limit: NEARBY_LIMIT,
        });

        let final_output = assemble_final_output(
            &material_analysis,
            &safety_assessment,
            &compliance_info,
            &instructions,
            &nearby_options,
        );

        tracing::info!(
            material = %material_analysis.material_type,
            source = %material_analysis.analysis_source,
            hazardous = safety_assessment.is_hazardous,
            risk = %safety_assessment.risk_level,
            compliance = %compliance_info.provenance,
            facilities = nearby_options.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pipeline run complete"
        );

        Ok(PipelineResult {
            run_id,
            generated_at: Utc::now(),
            image_fingerprint: image_fingerprint(request.image_bytes),
            material_analysis,
            safety_assessment,
            regulatory_requirements,
            compliance_info,
            instructions,
            nearby_options,
            final_output,
        })
    }
}

/// Flatten the stage records into the summary the UI shows.
pub fn assemble_final_output(
    analysis: &MaterialAnalysis,
    safety: &SafetyAssessment,
    compliance: &ComplianceInfo,
    instructions: &InstructionPayload,
    facilities: &[FacilityMatch],
) -> FinalOutput {
    let local_rules = compliance
        .citations
        .iter()
        .map(|c| LocalRule {
            rule: c.clone(),
            source: CITATION_SOURCE.to_string(),
        })
        .chain(compliance.sources.iter().map(|s| LocalRule {
            rule: SOURCE_DOCUMENT_RULE.to_string(),
            source: s.clone(),
        }))
        .collect();

    let nudge = if instructions.nudge.trim().is_empty() {
        analysis.sustainability_nudge.clone()
    } else {
        instructions.nudge.clone()
    };

    FinalOutput {
        item: analysis.display_label().to_string(),
        materials: vec![analysis.material_type.clone()],
        hazard_level: safety.risk_level,
        confidence: f64::from(analysis.confidence_score) / 100.0,
        instructions: instructions.instructions.clone(),
        do_not: instructions.do_not.clone(),
        local_rules,
        nearby_options: facilities
            .iter()
            .map(|f| NearbyOption {
                name: f.name.clone(),
                kind: COLLECTION_CENTER.to_string(),
                distance_km: f.distance_km,
            })
            .collect(),
        nudge,
        analysis_source: analysis.analysis_source,
    }
}

/// Base64 SHA-256 of the image bytes.
pub fn image_fingerprint(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(Sha256::digest(bytes))
}

fn build_gemini(config: &AppConfig) -> Result<Option<Arc<GeminiClient>>, LlmError> {
    let Some(key) = &config.google_api_key else {
        return Ok(None);
    };
    let client = match &config.gemini_model {
        Some(model) => GeminiClient::new(
            &config.gemini_base_url,
            key,
            model,
            config.request_timeout_secs,
        )?,
        None => GeminiClient::new(
            &config.gemini_base_url,
            key,
            GEMINI_MODELS[0],
            config.request_timeout_secs,
        )?
        .with_resolved_model()?,
    };
    Ok(Some(Arc::new(client)))
}

fn build_openrouter(config: &AppConfig) -> Result<Option<OpenRouterClient>, LlmError> {
    let Some(key) = &config.openrouter_api_key else {
        return Ok(None);
    };
    let client = OpenRouterClient::new(
        &config.openrouter_base_url,
        key,
        &config.openrouter_model_text,
        config.request_timeout_secs,
    )?
    .with_attribution(
        config.openrouter_app_url.clone(),
        config.openrouter_app_name.clone(),
    );
    Ok(Some(client))
}
