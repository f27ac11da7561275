use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::compliance::ComplianceInfo;
use super::enums::{AnalysisSource, RiskLevel};
use super::facility::FacilityMatch;
use super::instructions::InstructionPayload;
use super::material::MaterialAnalysis;
use super::safety::{ComplianceRequirements, SafetyAssessment};

/// Everything one pipeline run produced. Built fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Base64 SHA-256 of the submitted image bytes.
    pub image_fingerprint: String,
    pub material_analysis: MaterialAnalysis,
    pub safety_assessment: SafetyAssessment,
    pub regulatory_requirements: ComplianceRequirements,
    pub compliance_info: ComplianceInfo,
    pub instructions: InstructionPayload,
    pub nearby_options: Vec<FacilityMatch>,
    pub final_output: FinalOutput,
}

/// Flattened summary consumed by the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalOutput {
    pub item: String,
    pub materials: Vec<String>,
    pub hazard_level: RiskLevel,
    /// 0–1.
    pub confidence: f64,
    pub instructions: Vec<String>,
    pub do_not: Vec<String>,
    pub local_rules: Vec<LocalRule>,
    pub nearby_options: Vec<NearbyOption>,
    pub nudge: String,
    pub analysis_source: AnalysisSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalRule {
    pub rule: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub distance_km: Option<f64>,
}
