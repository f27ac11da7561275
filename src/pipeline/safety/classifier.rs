use std::collections::BTreeSet;

use super::guidelines::safety_guidelines;
use super::keywords::HAZARD_PATTERNS;
use crate::models::{HazardCategory, MaterialAnalysis, RiskLevel, SafetyAssessment};

/// Hazard signals needed for each risk level above `Low`.
const MEDIUM_THRESHOLD: usize = 1;
const HIGH_THRESHOLD: usize = 3;

/// Derive a `SafetyAssessment` from a material analysis. Pure; never fails.
pub fn assess(analysis: &MaterialAnalysis) -> SafetyAssessment {
    let text = format!(
        "{} {} {}",
        analysis.material_type, analysis.description, analysis.material_category
    )
    .to_lowercase();

    let mut categories = BTreeSet::new();
    let mut signals = 0usize;

    for pattern in HAZARD_PATTERNS.iter() {
        let hits = pattern.count_hits(&text);
        if hits > 0 {
            signals += hits;
            categories.insert(pattern.category);
        }
    }

    let indicators = analysis
        .hazardous_indicators
        .iter()
        .filter(|i| !i.trim().is_empty())
        .count();
    if indicators > 0 {
        signals += indicators;
        categories.insert(HazardCategory::VisionDetected);
    }

    let categories: Vec<HazardCategory> = categories.into_iter().collect();
    let risk_level = risk_level_for(signals);

    tracing::debug!(
        signals,
        risk = %risk_level,
        categories = ?categories,
        "Hazard assessment"
    );

    SafetyAssessment {
        is_hazardous: !categories.is_empty(),
        risk_level,
        safety_guidelines: safety_guidelines(&categories),
        hazard_categories: categories,
        signal_count: signals,
        confidence: analysis.confidence_score,
    }
}

/// 0 → low, 1–2 → medium, 3+ → high.
pub fn risk_level_for(signals: usize) -> RiskLevel {
    if signals >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if signals >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisSource, MaterialCategory, RecyclabilityStatus};

    fn analysis(
        material_type: &str,
        description: &str,
        category: MaterialCategory,
    ) -> MaterialAnalysis {
        MaterialAnalysis {
            material_type: material_type.into(),
            material_category: category,
            confidence_score: 80,
            hazardous_indicators: vec![],
            description: description.into(),
            recyclability_status: RecyclabilityStatus::Recyclable,
            sustainability_nudge: String::new(),
            analysis_source: AnalysisSource::PrimaryModel,
        }
    }

    #[test]
    fn zero_signals_is_low_and_safe() {
        let result = assess(&analysis("PET Plastic", "Clear bottle", MaterialCategory::Plastic));
        assert!(!result.is_hazardous);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.hazard_categories.is_empty());
        assert_eq!(result.signal_count, 0);
        assert_eq!(result.safety_guidelines.len(), 3);
    }

    #[test]
    fn one_signal_is_medium() {
        let result = assess(&analysis("Paint tin", "Empty container", MaterialCategory::Mixed));
        assert!(result.is_hazardous);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.hazard_categories, vec![HazardCategory::Chemicals]);
    }

    #[test]
    fn three_signals_across_categories_is_high() {
        let result = assess(&analysis(
            "Mixed bag",
            "A used syringe, a phone and some pesticide",
            MaterialCategory::Mixed,
        ));
        assert_eq!(result.signal_count, 3);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.hazard_categories,
            vec![
                HazardCategory::Chemicals,
                HazardCategory::Medical,
                HazardCategory::Electronics
            ]
        );
    }

    #[test]
    fn model_indicators_count_as_vision_signals() {
        let mut a = analysis("Jar", "Screw-top jar", MaterialCategory::Plastic);
        a.hazardous_indicators = vec!["Residue".into(), "Unknown liquid".into()];
        let result = assess(&a);
        // "screw" plus two indicators
        assert_eq!(result.signal_count, 3);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.hazard_categories,
            vec![HazardCategory::SharpObjects, HazardCategory::VisionDetected]
        );
    }

    #[test]
    fn categories_are_deduplicated() {
        let result = assess(&analysis("Battery", "battery battery", MaterialCategory::Mixed));
        // three "battery" hits in each of two families
        assert_eq!(result.signal_count, 6);
        assert_eq!(result.hazard_categories.len(), 2);
    }

    #[test]
    fn confidence_is_copied() {
        let result = assess(&analysis("x", "y", MaterialCategory::Mixed));
        assert_eq!(result.confidence, 80);
    }

    #[test]
    fn hazard_iff_categories_present() {
        for text in ["clean cardboard", "toxic sludge", "broken knife", ""] {
            let result = assess(&analysis(text, "", MaterialCategory::Mixed));
            assert_eq!(result.is_hazardous, !result.hazard_categories.is_empty());
        }
    }

    #[test]
    fn colour_fallback_verdicts() {
        use crate::pipeline::vision::classify_by_color;

        let metal = assess(&classify_by_color([150, 150, 155], None));
        assert!(metal.is_hazardous);
        assert_eq!(metal.risk_level, RiskLevel::Medium);
        assert_eq!(metal.hazard_categories, vec![HazardCategory::SharpObjects]);

        let glass = assess(&classify_by_color([40, 140, 60], None));
        assert!(glass.is_hazardous);
        assert_eq!(glass.risk_level, RiskLevel::High);
        assert_eq!(glass.signal_count, 3);

        let pet = assess(&classify_by_color([90, 120, 200], None));
        assert!(!pet.is_hazardous);
    }

    #[test]
    fn thresholds() {
        assert_eq!(risk_level_for(0), RiskLevel::Low);
        assert_eq!(risk_level_for(1), RiskLevel::Medium);
        assert_eq!(risk_level_for(2), RiskLevel::Medium);
        assert_eq!(risk_level_for(3), RiskLevel::High);
        assert_eq!(risk_level_for(40), RiskLevel::High);
    }
}
