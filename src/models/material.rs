use serde::{Deserialize, Serialize};

use super::enums::{AnalysisSource, MaterialCategory, RecyclabilityStatus};

/// Structured description of a photographed waste item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAnalysis {
    pub material_type: String,
    pub material_category: MaterialCategory,
    /// Always within 0–100.
    pub confidence_score: u8,
    pub hazardous_indicators: Vec<String>,
    pub description: String,
    pub recyclability_status: RecyclabilityStatus,
    pub sustainability_nudge: String,
    pub analysis_source: AnalysisSource,
}

impl MaterialAnalysis {
    /// Label shown to the end user: the description when present, else the type.
    pub fn display_label(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.material_type
        } else {
            &self.description
        }
    }
}

/// Clamp any model-reported confidence into 0–100.
pub fn clamp_confidence(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}
