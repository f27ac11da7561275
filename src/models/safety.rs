use serde::{Deserialize, Serialize};

use super::enums::{HazardCategory, RiskLevel};

/// Hazard verdict derived from a `MaterialAnalysis`.
///
/// `is_hazardous` is true iff `hazard_categories` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub is_hazardous: bool,
    pub risk_level: RiskLevel,
    /// Sorted, no duplicates.
    pub hazard_categories: Vec<HazardCategory>,
    pub safety_guidelines: Vec<String>,
    /// Hazard signals counted (keyword occurrences + model indicators).
    pub signal_count: usize,
    pub confidence: u8,
}

/// Regulatory obligations implied by a set of hazard categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRequirements {
    pub applicable_laws: Vec<String>,
    pub disposal_requirements: Vec<String>,
    pub documentation_needed: Vec<String>,
}
