use crate::models::{InstructionPayload, InstructionSource};

pub const HAZARDOUS_PPE_STEP: &str =
    "Wear gloves and other protective equipment (PPE) before handling the item.";
pub const HAZARDOUS_CONTAINER_STEP: &str =
    "Seal the item in a leak-proof container and keep it away from heat and children.";
pub const HAZARDOUS_HANDLER_STEP: &str =
    "Hand it over only to an authorized hazardous waste handler or collection centre.";

pub const NO_HOUSEHOLD_BINS: &str = "Never place in household or public bins.";
pub const NO_BURN_OR_CRUSH: &str = "Never burn or crush.";

const HAZARDOUS_STEPS: &[&str] = &[
    HAZARDOUS_PPE_STEP,
    HAZARDOUS_CONTAINER_STEP,
    HAZARDOUS_HANDLER_STEP,
];
const HAZARDOUS_DO_NOT: &[&str] = &[NO_HOUSEHOLD_BINS, NO_BURN_OR_CRUSH];

const SAFE_STEPS: &[&str] = &[
    "Rinse or wipe the item to remove food and liquid residue.",
    "Segregate it into the dry waste stream.",
    "Hand it over to an authorized recycler or collection centre.",
];
const SAFE_DO_NOT: &[&str] = &["Never mix with wet waste.", "Never burn."];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed instructions chosen only by the hazard verdict.
pub fn template_instructions(is_hazardous: bool, nudge: &str) -> InstructionPayload {
    let (steps, do_not) = if is_hazardous {
        (HAZARDOUS_STEPS, HAZARDOUS_DO_NOT)
    } else {
        (SAFE_STEPS, SAFE_DO_NOT)
    };
    InstructionPayload {
        instructions: owned(steps),
        do_not: owned(do_not),
        nudge: nudge.to_string(),
        provenance: InstructionSource::Template,
    }
}
