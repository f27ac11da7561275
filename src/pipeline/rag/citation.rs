//! Best-effort annotation of free-text regulatory answers. Every extractor
//! is a pure function over a string: first capture group of each pattern,
//! case-insensitive, duplicates removed (first occurrence wins).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("Invalid text-mining pattern"))
        .collect()
}

static SECTION_CITATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(Section \d+[A-Z]?(?:\(\d+\))?)",
        r"(Chapter \d+)",
        r"(Rule \d+[A-Z]?(?:\(\d+\))?)",
        r"(Schedule [IVX]+)",
        r"(Annexure [IVX]+)",
    ])
});

static COMPLIANCE_TERMS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(compliance|requirement|must|shall|should|obligation|duty|responsibility)\b",
        r"\b(section|chapter|rule|regulation|clause)\b",
        r"\b(penalty|fine|punishment|consequence)\b",
        r"\b(within \d+ days|monthly|annual|periodic)\b",
    ])
});

static REGULATORY_REFS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(CPCB.*?2016)",
        r"(Solid Waste Management Rules.*?2016)",
        r"(Hazardous and Other Wastes Rules.*?2016)",
        r"(Bio-medical Waste Management Rules.*?2016)",
        r"(E-Waste \(?Management\)? Rules.*?2016)",
        r"(Environment Protection Act.*?1986)",
    ])
});

static MANDATORY_STEPS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(must.*?)(?:\.|\n)",
        r"(shall.*?)(?:\.|\n)",
        r"(required to.*?)(?:\.|\n)",
        r"(need to.*?)(?:\.|\n)",
        r"(procedure.*?)(?:\.|\n)",
    ])
});

static AUTHORIZED_ENTITIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(authori[sz]ed.*?handler)",
        r"(certified.*?facility)",
        r"(licensed.*?operator)",
        r"(government approved.*?entity)",
        r"(CPCB authori[sz]ed)",
        r"(State PCB recognized)",
    ])
});

static COLLECTION_TARGETS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(\d+%\s*(?:of|for|collection))",
        r"(\d+\s*(?:tons|tonnes|kg)\s*(?:per|target))",
        r"(collection target.*?\d+%)",
        r"((?:minimum|maximum)\s*\d+%\s*(?:collection|recovery))",
    ])
});

static REPORTING: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(report.*?(?:quarterly|annual|monthly|yearly))",
        r"(submit.*?report)",
        r"(documentation.*?requirement)",
        r"(record keeping.*?)(?:\.|\n)",
    ])
});

static PENALTIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(penalty.*?\d+)",
        r"(fine.*?Rs)",
        r"\b(imprisonment|jail|custody)\b",
        r"(Section \d+.*?penalty)",
    ])
});

fn collect(patterns: &[Regex], text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let hit = m.as_str().trim().to_string();
                if !hit.is_empty() && seen.insert(hit.clone()) {
                    out.push(hit);
                }
            }
        }
    }
    out
}

/// "Section 5", "Rule 5(1)", "Schedule I", ...
pub fn extract_section_citations(text: &str) -> Vec<String> {
    collect(&SECTION_CITATIONS, text)
}

pub fn extract_compliance_terms(text: &str) -> Vec<String> {
    collect(&COMPLIANCE_TERMS, text)
}

pub fn extract_regulatory_refs(text: &str) -> Vec<String> {
    collect(&REGULATORY_REFS, text)
}

pub fn extract_mandatory_steps(text: &str) -> Vec<String> {
    collect(&MANDATORY_STEPS, text)
}

pub fn extract_authorized_entities(text: &str) -> Vec<String> {
    collect(&AUTHORIZED_ENTITIES, text)
}

pub fn extract_collection_targets(text: &str) -> Vec<String> {
    collect(&COLLECTION_TARGETS, text)
}

pub fn extract_reporting_requirements(text: &str) -> Vec<String> {
    collect(&REPORTING, text)
}

pub fn extract_penalties(text: &str) -> Vec<String> {
    collect(&PENALTIES, text)
}
