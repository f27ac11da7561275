use serde::{Deserialize, Serialize};

use super::enums::ComplianceSource;

/// Disposal guidance for one material type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInfo {
    pub material_type: String,
    /// Never empty; degraded paths use a fixed sentinel sentence.
    pub guidelines: String,
    pub sources: Vec<String>,
    pub compliance_requirements: Vec<String>,
    pub citations: Vec<String>,
    pub provenance: ComplianceSource,
}

/// Emergency handling protocol for a hazardous item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardProtocol {
    pub material_description: String,
    pub emergency_protocol: String,
    pub regulatory_references: Vec<String>,
    pub mandatory_steps: Vec<String>,
    pub authorized_handlers: Vec<String>,
    pub provenance: ComplianceSource,
}

/// Extended Producer Responsibility obligations for a product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EprObligations {
    pub product_category: String,
    pub obligations: String,
    pub collection_targets: Vec<String>,
    pub reporting_requirements: Vec<String>,
    pub penalty_structure: Vec<String>,
    pub provenance: ComplianceSource,
}

/// A stored regulatory passage similar to a described scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCase {
    pub content: String,
    pub source: String,
    pub relevance: f32,
}
