use crate::models::{MaterialCategory, RecyclabilityStatus};

/// Canned record the colour heuristic starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialTemplate {
    pub material_type: &'static str,
    pub confidence_score: u8,
    pub hazardous_indicators: &'static [&'static str],
    pub recyclability_status: RecyclabilityStatus,
    pub description: &'static str,
    pub material_category: MaterialCategory,
}

pub const PLASTIC_BOTTLE: MaterialTemplate = MaterialTemplate {
    material_type: "PET Plastic",
    confidence_score: 95,
    hazardous_indicators: &[],
    recyclability_status: RecyclabilityStatus::Recyclable,
    description: "Clear PET plastic bottle.",
    material_category: MaterialCategory::Plastic,
};

pub const CARDBOARD: MaterialTemplate = MaterialTemplate {
    material_type: "Corrugated Cardboard",
    confidence_score: 92,
    hazardous_indicators: &[],
    recyclability_status: RecyclabilityStatus::Recyclable,
    description: "Brown corrugated fiberboard.",
    material_category: MaterialCategory::Paper,
};

pub const METAL_CAN: MaterialTemplate = MaterialTemplate {
    material_type: "Aluminum Can",
    confidence_score: 98,
    hazardous_indicators: &[],
    recyclability_status: RecyclabilityStatus::Recyclable,
    description: "Aluminum beverage container.",
    material_category: MaterialCategory::Metal,
};

pub const WHITE_PAPER: MaterialTemplate = MaterialTemplate {
    material_type: "White Paper",
    confidence_score: 88,
    hazardous_indicators: &[],
    recyclability_status: RecyclabilityStatus::Recyclable,
    description: "Bleached wood pulp paper.",
    material_category: MaterialCategory::Paper,
};

pub const ELECTRONICS: MaterialTemplate = MaterialTemplate {
    material_type: "E-Waste",
    confidence_score: 85,
    hazardous_indicators: &["Heavy Metals"],
    recyclability_status: RecyclabilityStatus::Hazardous,
    description: "Electronic circuit components.",
    material_category: MaterialCategory::Electronic,
};

pub const GLASS_BOTTLE: MaterialTemplate = MaterialTemplate {
    material_type: "Glass Container",
    confidence_score: 90,
    hazardous_indicators: &[],
    recyclability_status: RecyclabilityStatus::Recyclable,
    description: "Silica-based glass container.",
    material_category: MaterialCategory::Glass,
};
