use std::sync::LazyLock;

use regex::Regex;

use super::templates::{HAZARDOUS_HANDLER_STEP, HAZARDOUS_PPE_STEP, NO_HOUSEHOLD_BINS};
use crate::models::InstructionPayload;

/// A step that sends the item to an ordinary bin or household waste stream.
static BIN_DISPOSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:household|domestic|general|public|regular|municipal|kitchen|dry|wet|recycling|mixed)\s+(?:waste\s+)?bins?\b",
        r"|\b(?:dust|trash|garbage|rubbish|litter|wheelie)\s*bins?\b",
        r"|\b(?:household|domestic|general|regular|municipal|mixed|ordinary)\s+(?:waste|trash|garbage|rubbish|refuse)\b",
        r"|\b(?:in|into|with)\s+(?:the|your|a|any)\s+(?:trash|garbage|rubbish|bin|dustbin|dumpster)\b",
        r"|\b(?:bin|trash|dump) it\b",
    ))
    .expect("Invalid bin pattern")
});

/// Steps phrased as a prohibition are not disposal advice.
static NEGATED_STEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\W*(?:never|do\s+not|don'?t|avoid)\b").expect("Invalid negation pattern")
});

static PPE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ppe|gloves?|protective|goggles|mask)\b").expect("Invalid PPE pattern")
});

static AUTHORIZED_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:authori[sz]ed|certified|licensed|registered|tsdf)\b")
        .expect("Invalid authorization pattern")
});

/// A prohibition naming household or public bins.
static HOUSEHOLD_BIN_PROHIBITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:household|public|general|regular)\b.*\bbins?\b|\bdustbins?\b")
        .expect("Invalid prohibition pattern")
});

/// True when a hazardous item's payload already satisfies the contract:
/// no bin disposal step, PPE and authorized-handler language present, and
/// a household/public bin prohibition in `do_not`.
pub fn satisfies_hazard_contract(payload: &InstructionPayload) -> bool {
    !payload.instructions.iter().any(|s| recommends_bin_disposal(s))
        && payload.instructions.iter().any(|s| PPE_LANGUAGE.is_match(s))
        && payload.instructions.iter().any(|s| AUTHORIZED_LANGUAGE.is_match(s))
        && payload.do_not.iter().any(|s| HOUSEHOLD_BIN_PROHIBITION.is_match(s))
}

fn recommends_bin_disposal(step: &str) -> bool {
    BIN_DISPOSAL.is_match(step) && !NEGATED_STEP.is_match(step)
}

/// Bring model-written instructions for a hazardous item into line.
///
/// Returns the number of changes made.
pub fn enforce_hazard_contract(payload: &mut InstructionPayload) -> usize {
    let mut repairs = 0;

    let before = payload.instructions.len();
    payload.instructions.retain(|s| !recommends_bin_disposal(s));
    repairs += before - payload.instructions.len();

    if !payload.instructions.iter().any(|s| PPE_LANGUAGE.is_match(s)) {
        payload.instructions.insert(0, HAZARDOUS_PPE_STEP.to_string());
        repairs += 1;
    }
    if !payload
        .instructions
        .iter()
        .any(|s| AUTHORIZED_LANGUAGE.is_match(s))
    {
        payload.instructions.push(HAZARDOUS_HANDLER_STEP.to_string());
        repairs += 1;
    }
    if !payload
        .do_not
        .iter()
        .any(|s| HOUSEHOLD_BIN_PROHIBITION.is_match(s))
    {
        payload.do_not.insert(0, NO_HOUSEHOLD_BINS.to_string());
        repairs += 1;
    }

    repairs
}
