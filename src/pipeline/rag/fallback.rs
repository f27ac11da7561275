use crate::models::{ComplianceInfo, ComplianceSource, EprObligations, HazardProtocol};

pub const UNAVAILABLE_GUIDELINES: &str =
    "Compliance check temporarily unavailable (Network/API Error).";

struct StaticRule {
    keywords: &'static [&'static str],
    guidelines: &'static str,
    sources: &'static [&'static str],
    requirements: &'static [&'static str],
    citations: &'static [&'static str],
}

// Checked in order. Electronics comes first so that labels such as
// "E-Waste / ABS Plastic" get the e-waste rules, not the plastic ones.
const STATIC_RULES: &[StaticRule] = &[
    StaticRule {
        keywords: &["e-waste", "ewaste", "electronic", "circuit"],
        guidelines: "As per E-Waste Rules 2016: Consumers must channel e-waste to authorized collection centers or recycler. Do not mix with municipal solid waste.",
        sources: &["E-Waste (Management) Rules, 2016"],
        requirements: &["Deposit at Collection Center", "No Dismantling by Informal Sector"],
        citations: &["Schedule I", "Rule 4"],
    },
    StaticRule {
        keywords: &["plastic", "pet", "bottle"],
        guidelines: "As per PWM Rules 2016, Section 5: Plastic waste must be segregated at source. PET bottles should be cleaned, crushed, and handed over to authorized recyclers. Burning is strictly prohibited.",
        sources: &["CPCB Plastic Waste Management Rules, 2016"],
        requirements: &["Segregation at Source", "No Burning"],
        citations: &["Rule 5(1)", "Rule 6"],
    },
    StaticRule {
        keywords: &["cardboard", "paper"],
        guidelines: "Solid Waste Management Rules 2016: Biodegradable and non-biodegradable waste must be segregated. Dry paper waste should be sent for material recovery.",
        sources: &["SWM Rules, 2016"],
        requirements: &["Dry Waste Segregation"],
        citations: &["Rule 15"],
    },
];

const GENERAL_RULE: StaticRule = StaticRule {
    keywords: &[],
    guidelines: "General SWM Rules 2016: Segregate into Wet (Green Bin), Dry (Blue Bin), and Hazardous (Red Bin) fractions. Hand over to authorized collectors.",
    sources: &["Solid Waste Management Rules, 2016"],
    requirements: &["3-Way Segregation"],
    citations: &["Rule 15"],
};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed CPCB record keyed by material family. Needs no remote call.
pub fn static_compliance(material_type: &str) -> ComplianceInfo {
    let lower = material_type.to_lowercase();
    let rule = STATIC_RULES
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .unwrap_or(&GENERAL_RULE);

    ComplianceInfo {
        material_type: material_type.to_string(),
        guidelines: rule.guidelines.to_string(),
        sources: owned(rule.sources),
        compliance_requirements: owned(rule.requirements),
        citations: owned(rule.citations),
        provenance: ComplianceSource::StaticFallback,
    }
}

/// Returned on any failure other than a rate limit.
pub fn unavailable_compliance(material_type: &str) -> ComplianceInfo {
    ComplianceInfo {
        material_type: material_type.to_string(),
        guidelines: UNAVAILABLE_GUIDELINES.to_string(),
        sources: Vec::new(),
        compliance_requirements: Vec::new(),
        citations: Vec::new(),
        provenance: ComplianceSource::Unavailable,
    }
}

pub fn static_hazard_protocol(material_description: &str) -> HazardProtocol {
    HazardProtocol {
        material_description: material_description.to_string(),
        emergency_protocol:
            "Standard Hazard Protocol: Isolate material, wear PPE, contact authorized hazardous waste handler."
                .to_string(),
        regulatory_references: owned(&["Hazardous Waste Rules 2016"]),
        mandatory_steps: owned(&["Do not touch with bare hands", "Segregate"]),
        authorized_handlers: owned(&["TSDF Operators"]),
        provenance: ComplianceSource::StaticFallback,
    }
}

pub fn unavailable_epr(product_category: &str, reason: &str) -> EprObligations {
    EprObligations {
        product_category: product_category.to_string(),
        obligations: format!("Error retrieving EPR info: {reason}"),
        collection_targets: Vec::new(),
        reporting_requirements: Vec::new(),
        penalty_structure: Vec::new(),
        provenance: ComplianceSource::Unavailable,
    }
}
