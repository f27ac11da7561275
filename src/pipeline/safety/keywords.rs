use std::sync::LazyLock;

use regex::Regex;

use crate::models::HazardCategory;

/// A compiled keyword family: whole-word, case-insensitive alternation.
pub struct HazardPattern {
    pub category: HazardCategory,
    pub terms: &'static [&'static str],
    regex: Regex,
}

impl HazardPattern {
    /// Number of keyword occurrences in `text` (every hit counts).
    pub fn count_hits(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

const CHEMICAL_TERMS: &[&str] = &[
    "acid", "alkali", "corrosive", "toxic", "poison", "pesticide", "insecticide", "herbicide",
    "solvent", "paint", "thinner", "battery", "mercury", "lead", "cadmium", "asbestos",
    "radioactive", "flammable", "explosive", "oxidizer",
];

const MEDICAL_TERMS: &[&str] = &[
    "syringe", "needle", "scalpel", "blade", "blood", "biohazard", "medical waste",
    "pharmaceutical", "medication", "tablet", "capsule", "iv bag", "catheter", "gauze", "bandage",
];

const ELECTRONIC_TERMS: &[&str] = &[
    "circuit board", "electronic", "computer", "phone", "battery", "wire", "cable",
    "transformer", "capacitor", "resistor",
];

const SHARP_TERMS: &[&str] = &[
    "glass", "broken", "sharp", "blade", "knife", "scissors", "razor", "nail", "screw", "metal",
];

/// Keyword families in evaluation order.
pub static HAZARD_PATTERNS: LazyLock<Vec<HazardPattern>> = LazyLock::new(|| {
    vec![
        pattern(HazardCategory::Chemicals, CHEMICAL_TERMS),
        pattern(HazardCategory::Medical, MEDICAL_TERMS),
        pattern(HazardCategory::Electronics, ELECTRONIC_TERMS),
        pattern(HazardCategory::SharpObjects, SHARP_TERMS),
    ]
});

fn pattern(category: HazardCategory, terms: &'static [&'static str]) -> HazardPattern {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    HazardPattern {
        category,
        terms,
        regex: Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .expect("Invalid hazard keyword pattern"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(category: HazardCategory) -> &'static HazardPattern {
        HAZARD_PATTERNS
            .iter()
            .find(|p| p.category == category)
            .unwrap()
    }

    #[test]
    fn four_keyword_families() {
        assert_eq!(HAZARD_PATTERNS.len(), 4);
    }

    #[test]
    fn whole_words_only() {
        let chem = family(HazardCategory::Chemicals);
        assert_eq!(chem.count_hits("acidic runoff"), 0);
        assert_eq!(chem.count_hits("battery acid"), 2);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let med = family(HazardCategory::Medical);
        assert_eq!(med.count_hits("Used SYRINGE and IV Bag"), 2);
    }

    #[test]
    fn repeated_terms_count_each_occurrence() {
        let elec = family(HazardCategory::Electronics);
        assert_eq!(elec.count_hits("electronic casing, electronic board"), 2);
    }

    #[test]
    fn multi_word_terms_match() {
        let elec = family(HazardCategory::Electronics);
        assert_eq!(elec.count_hits("a green circuit board"), 1);
    }

    #[test]
    fn glass_and_metal_are_sharp_terms() {
        let sharp = family(HazardCategory::SharpObjects);
        assert_eq!(sharp.count_hits("green glass bottle"), 1);
        assert_eq!(sharp.count_hits("broken glass shards"), 2);
        assert_eq!(sharp.count_hits("metal lid"), 1);
        assert_eq!(sharp.count_hits("metallic finish"), 0);
    }

    #[test]
    fn battery_is_in_two_families() {
        assert!(family(HazardCategory::Chemicals).terms.contains(&"battery"));
        assert!(family(HazardCategory::Electronics).terms.contains(&"battery"));
    }
}
