use crate::models::{ComplianceRequirements, HazardCategory};

const SAFE_BLOCK: &[&str] = &[
    "Material appears safe for standard recycling procedures",
    "Follow general waste segregation guidelines",
    "Handle with regular protective equipment",
];

const CHEMICAL_BLOCK: &[&str] = &[
    "⚠️ CHEMICAL HAZARD DETECTED",
    "Use chemical-resistant gloves and eye protection",
    "Ensure adequate ventilation in handling area",
    "Contact certified hazardous waste disposal facility",
    "Do not mix with regular recyclables",
];

const MEDICAL_BLOCK: &[&str] = &[
    "⚠️ BIOHAZARD/MEDICAL WASTE DETECTED",
    "Use puncture-resistant gloves and face protection",
    "Segregate immediately in leak-proof container",
    "Contact medical waste disposal specialist",
    "Follow CPCB biomedical waste handling protocols",
];

const ELECTRONIC_BLOCK: &[&str] = &[
    "⚠️ ELECTRONIC WASTE DETECTED",
    "Contains potentially toxic materials (lead, mercury, etc.)",
    "Contact authorized e-waste recycling facility",
    "Do not attempt to dismantle components",
    "Follow E-Waste (Management) Rules, 2016",
];

const SHARP_BLOCK: &[&str] = &[
    "⚠️ SHARP OBJECTS DETECTED",
    "Use cut-resistant gloves",
    "Handle with extreme care to prevent injury",
    "Place in puncture-proof container",
    "Label appropriately for safe handling",
];

const CLOSING_BLOCK: &[&str] = &[
    "Report to local CPCB authority if required",
    "Maintain proper documentation for disposal",
    "Ensure handler is trained in hazardous material safety",
];

pub const BASELINE_LAW: &str = "CPCB Guidelines 2016";

/// Handling guidance for the detected categories.
///
/// Model-reported hazards without a keyword family get the chemical block,
/// the most conservative of the category warnings.
pub fn safety_guidelines(categories: &[HazardCategory]) -> Vec<String> {
    if categories.is_empty() {
        return to_owned(SAFE_BLOCK);
    }

    let has = |c: HazardCategory| categories.contains(&c);
    let mut lines = Vec::new();
    if has(HazardCategory::Chemicals) || has(HazardCategory::VisionDetected) {
        lines.extend(to_owned(CHEMICAL_BLOCK));
    }
    if has(HazardCategory::Medical) {
        lines.extend(to_owned(MEDICAL_BLOCK));
    }
    if has(HazardCategory::Electronics) {
        lines.extend(to_owned(ELECTRONIC_BLOCK));
    }
    if has(HazardCategory::SharpObjects) {
        lines.extend(to_owned(SHARP_BLOCK));
    }
    lines.extend(to_owned(CLOSING_BLOCK));
    lines
}

/// Applicable laws, disposal requirements and paperwork for a set of
/// hazard categories. The CPCB baseline always comes first.
pub fn compliance_requirements(categories: &[HazardCategory]) -> ComplianceRequirements {
    let mut laws = vec![BASELINE_LAW.to_string()];
    let mut disposal = Vec::new();
    let mut docs = Vec::new();

    if categories.is_empty() {
        laws.push("Solid Waste Management Rules, 2016".into());
        disposal.push("Standard recycling protocols".into());
        docs.push("Waste segregation records".into());
    }
    if categories.contains(&HazardCategory::Chemicals) {
        laws.push("Hazardous and Other Wastes Rules, 2016".into());
        laws.push("Environment Protection Act, 1986".into());
        disposal.push("Must be disposed through authorized hazardous waste handler".into());
        docs.push("Hazardous Waste Annual Returns".into());
        docs.push("Form 9 & 10 under Hazardous Wastes Rules".into());
    }
    if categories.contains(&HazardCategory::Medical) {
        laws.push("Bio-medical Waste Management Rules, 2016".into());
        disposal.push("Autoclaving/incineration by authorized facility".into());
        docs.push("BMW Annual Report to State Pollution Control Board".into());
    }
    if categories.contains(&HazardCategory::Electronics) {
        laws.push("E-Waste (Management) Rules, 2016".into());
        disposal.push("Processing by authorized dismantler/reprocessor".into());
        docs.push("E-waste annual returns and certificates".into());
    }

    ComplianceRequirements {
        applicable_laws: laws,
        disposal_requirements: disposal,
        documentation_needed: docs,
    }
}

fn to_owned(block: &[&str]) -> Vec<String> {
    block.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_material_gets_safe_block_only() {
        let lines = safety_guidelines(&[]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Material appears safe for standard recycling procedures");
    }

    #[test]
    fn each_category_adds_its_block_then_closing() {
        let lines = safety_guidelines(&[HazardCategory::Medical, HazardCategory::Electronics]);
        assert_eq!(lines.len(), 5 + 5 + 3);
        assert_eq!(lines[0], "⚠️ BIOHAZARD/MEDICAL WASTE DETECTED");
        assert_eq!(lines[5], "⚠️ ELECTRONIC WASTE DETECTED");
        assert_eq!(lines.last().unwrap(), "Ensure handler is trained in hazardous material safety");
    }

    #[test]
    fn vision_detected_uses_chemical_block() {
        let lines = safety_guidelines(&[HazardCategory::VisionDetected]);
        assert_eq!(lines[0], "⚠️ CHEMICAL HAZARD DETECTED");
    }

    #[test]
    fn requirements_baseline_for_no_hazards() {
        let req = compliance_requirements(&[]);
        assert_eq!(
            req.applicable_laws,
            vec![BASELINE_LAW, "Solid Waste Management Rules, 2016"]
        );
        assert_eq!(req.disposal_requirements, vec!["Standard recycling protocols"]);
    }

    #[test]
    fn requirements_for_chemicals_and_electronics() {
        let req =
            compliance_requirements(&[HazardCategory::Chemicals, HazardCategory::Electronics]);
        assert_eq!(req.applicable_laws[0], BASELINE_LAW);
        assert!(req
            .applicable_laws
            .contains(&"Hazardous and Other Wastes Rules, 2016".to_string()));
        assert!(req
            .applicable_laws
            .contains(&"E-Waste (Management) Rules, 2016".to_string()));
        assert_eq!(req.documentation_needed.len(), 3);
    }

    #[test]
    fn sharp_objects_only_keeps_baseline_law() {
        let req = compliance_requirements(&[HazardCategory::SharpObjects]);
        assert_eq!(req.applicable_laws, vec![BASELINE_LAW]);
        assert!(req.disposal_requirements.is_empty());
    }
}
