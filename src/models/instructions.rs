use serde::{Deserialize, Serialize};

use super::enums::InstructionSource;

/// Actionable disposal steps for the end user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionPayload {
    pub instructions: Vec<String>,
    pub do_not: Vec<String>,
    pub nudge: String,
    pub provenance: InstructionSource,
}
